//! Lenient JSON codec for persisted values.
//!
//! Shared by the storage adapters and the services that read raw
//! strings through them. Persisted documents can always have been
//! tampered with or truncated out from under us, so readers never fail
//! on malformed content: an undecodable value reads the same as a
//! missing one, and the next save overwrites it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StorageError;

/// Decodes a stored JSON value, treating malformed content as absent.
///
/// Returns `None` both when nothing was stored and when the stored
/// text does not decode to `T`. Malformed content is logged at debug
/// level with the key it was stored under.
pub fn decode_lenient<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key = key, "Discarding malformed stored value: {}", e);
            None
        }
    }
}

/// Encodes a value to the JSON text stored under `key`.
///
/// # Errors
///
/// Returns `StorageError::SerializationFailed` naming the key if the
/// value cannot be serialized.
pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::serialization(key, e.to_string()))
}
