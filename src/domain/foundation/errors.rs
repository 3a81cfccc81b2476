//! Shared error types for the domain layer.
//!
//! Nothing at this layer is fatal to the page. Callers log the failure,
//! fall back to defaults, and keep rendering. `DomainError` carries a
//! machine-readable [`ErrorCode`] so callers can branch on the category
//! without matching message strings.

use std::error::Error;
use std::fmt;

/// Category of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A consent flow was asked for a move its state machine forbids.
    InvalidStateTransition,
    /// A stored value or event payload did not deserialize into the
    /// expected shape.
    MalformedPayload,
    /// The event bus could not hand an envelope to a subscriber.
    EventDeliveryFailed,
    /// A cookie jar or key-value store operation failed.
    StorageFailure,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ErrorCode::EventDeliveryFailed => "EVENT_DELIVERY_FAILED",
            ErrorCode::StorageFailure => "STORAGE_FAILURE",
        };
        write!(f, "{}", s)
    }
}

/// Error carried across domain and application boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
