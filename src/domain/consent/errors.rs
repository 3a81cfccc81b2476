//! Consent-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StorageError;

/// Errors from consent flow operations.
///
/// Nothing here is fatal to the page: callers log and degrade. The enum
/// exists so callers can tell a wiring problem (`Delivery`) from a
/// storage problem (`Storage`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentError {
    /// Flow was asked for a transition it does not allow.
    InvalidState(String),
    /// Persisting or reading the record failed.
    Storage(String),
    /// Broadcasting the decision failed.
    Delivery(String),
}

impl ConsentError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ConsentError::InvalidState(message.into())
    }
    pub fn storage(message: impl Into<String>) -> Self {
        ConsentError::Storage(message.into())
    }
    pub fn delivery(message: impl Into<String>) -> Self {
        ConsentError::Delivery(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ConsentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ConsentError::Storage(_) => ErrorCode::StorageFailure,
            ConsentError::Delivery(_) => ErrorCode::EventDeliveryFailed,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ConsentError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ConsentError::Storage(msg) => format!("Consent storage failed: {}", msg),
            ConsentError::Delivery(msg) => format!("Consent broadcast failed: {}", msg),
        }
    }
}

impl std::fmt::Display for ConsentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConsentError {}

impl From<DomainError> for ConsentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ConsentError::InvalidState(err.to_string()),
            ErrorCode::EventDeliveryFailed | ErrorCode::MalformedPayload => {
                ConsentError::Delivery(err.to_string())
            }
            ErrorCode::StorageFailure => ConsentError::Storage(err.to_string()),
        }
    }
}

impl From<StorageError> for ConsentError {
    fn from(err: StorageError) -> Self {
        ConsentError::Storage(err.to_string())
    }
}
