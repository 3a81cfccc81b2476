//! Consent banner configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Consent cookie and banner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsentConfig {
    /// Name of the cookie the decision is persisted under
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of the persisted decision in days
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,

    /// Cosmetic delay before the banner prompts, in milliseconds
    #[serde(default = "default_banner_delay_ms")]
    pub banner_delay_ms: u64,
}

impl ConsentConfig {
    /// Get the banner delay as Duration
    pub fn banner_delay(&self) -> Duration {
        Duration::from_millis(self.banner_delay_ms)
    }

    /// Validate consent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cookie_name.is_empty() {
            return Err(ValidationError::MissingRequired("CONSENT_COOKIE_NAME"));
        }
        // Cookie names cannot carry separators or whitespace
        if self
            .cookie_name
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == ';')
        {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.expiry_days < 1 {
            return Err(ValidationError::InvalidExpiryDays);
        }
        Ok(())
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expiry_days: default_expiry_days(),
            banner_delay_ms: default_banner_delay_ms(),
        }
    }
}

fn default_cookie_name() -> String {
    "noova_cookie_consent".to_string()
}

fn default_expiry_days() -> i64 {
    365
}

fn default_banner_delay_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_config_defaults() {
        let config = ConsentConfig::default();
        assert_eq!(config.cookie_name, "noova_cookie_consent");
        assert_eq!(config.expiry_days, 365);
        assert_eq!(config.banner_delay_ms, 500);
    }

    #[test]
    fn test_banner_delay_duration() {
        let config = ConsentConfig {
            banner_delay_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.banner_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_default_is_valid() {
        assert!(ConsentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_cookie_name() {
        let config = ConsentConfig {
            cookie_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_cookie_name_with_separator() {
        for bad in ["has space", "has;semicolon", "has=equals"] {
            let config = ConsentConfig {
                cookie_name: bad.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_validation_expiry_must_be_positive() {
        let config = ConsentConfig {
            expiry_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
