//! KeyValueStore port - Interface for string key-value persistence.
//!
//! Two instances back the subsystem: an origin-scoped store whose values
//! survive restarts (stats, preferences) and a tab-scoped store whose
//! values end with the tab (the browsing session).

use async_trait::async_trait;

/// Errors that can occur during storage operations.
///
/// Malformed stored *content* is never an error: readers decode
/// leniently and treat undecodable values as absent. These variants
/// cover real backend failures only.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize value for key '{key}': {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Creates a serialization failure for a key.
    pub fn serialization(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::SerializationFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Port for string key-value persistence.
///
/// Implementations must ensure:
/// - `get` of a key never written returns `Ok(None)`
/// - `set` replaces any existing value whole
/// - `remove` of an absent key succeeds silently
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Absent keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn KeyValueStore) {}

    #[test]
    fn storage_error_serialization_names_key() {
        let err = StorageError::serialization("noova_analytics", "not valid JSON");
        assert!(err.to_string().contains("noova_analytics"));
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn storage_error_io_displays_reason() {
        let err = StorageError::Io("permission denied".to_string());
        assert!(err.to_string().contains("permission denied"));
    }
}
