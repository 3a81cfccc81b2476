//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Number of random characters appended to a generated session id.
const SESSION_ID_SUFFIX_LEN: usize = 9;

/// Identifier for a browsing session.
///
/// Generated ids follow the `session_<millis>_<suffix>` shape so they sort
/// roughly by creation time and read well in logs. They are best-effort
/// unique only; nothing in the system keys on their uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new session id stamped with the given start time.
    pub fn generate(started_at: Timestamp) -> Self {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SESSION_ID_SUFFIX_LEN)
            .collect();
        Self(format!("session_{}_{}", started_at.as_unix_millis(), suffix))
    }

    /// Creates a SessionId from an existing string.
    ///
    /// No validation is performed - ids read back from storage are
    /// accepted as-is.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
