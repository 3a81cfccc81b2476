//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Cookie name must not contain whitespace, '=' or ';'")]
    InvalidCookieName,

    #[error("Consent expiry must be at least one day")]
    InvalidExpiryDays,

    #[error("Event cap must be at least one")]
    InvalidEventCap,

    #[error("Storage keys must be distinct")]
    DuplicateStorageKey,
}
