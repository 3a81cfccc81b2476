//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `NOOVA_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use noova_privacy::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Consent cookie: {}", config.consent.cookie_name);
//! ```

mod analytics;
mod consent;
mod error;
mod preferences;
mod storage;

pub use analytics::AnalyticsConfig;
pub use consent::ConsentConfig;
pub use error::{ConfigError, ValidationError};
pub use preferences::PreferencesConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the consent subsystem.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Consent cookie and banner settings
    #[serde(default)]
    pub consent: ConsentConfig,

    /// Local analytics storage keys and limits
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Visitor preferences storage key
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NOOVA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// Every value has a default, so an empty environment loads the
    /// stock Noova setup.
    ///
    /// # Environment Variable Format
    ///
    /// - `NOOVA__CONSENT__COOKIE_NAME=my_consent` -> `consent.cookie_name`
    /// - `NOOVA__STORAGE__BACKEND=file` -> `storage.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("NOOVA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Cookie name syntax and expiry horizon
    /// - Storage key presence and uniqueness across sections
    /// - File backend directory requirements
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.consent.validate()?;
        self.analytics.validate()?;
        self.preferences.validate()?;
        self.storage.validate()?;

        // The three documents share one origin-scoped namespace
        if self.preferences.storage_key == self.analytics.stats_key
            || self.preferences.storage_key == self.analytics.session_key
        {
            return Err(ValidationError::DuplicateStorageKey);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            consent: ConsentConfig::default(),
            analytics: AnalyticsConfig::default(),
            preferences: PreferencesConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "noova_privacy=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("NOOVA__CONSENT__COOKIE_NAME");
        env::remove_var("NOOVA__CONSENT__EXPIRY_DAYS");
        env::remove_var("NOOVA__CONSENT__BANNER_DELAY_MS");
        env::remove_var("NOOVA__ANALYTICS__MAX_STORED_EVENTS");
        env::remove_var("NOOVA__PREFERENCES__STORAGE_KEY");
        env::remove_var("NOOVA__STORAGE__BACKEND");
        env::remove_var("NOOVA__STORAGE__DATA_DIR");
        env::remove_var("NOOVA__LOG_LEVEL");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.consent.cookie_name, "noova_cookie_consent");
        assert_eq!(config.consent.expiry_days, 365);
        assert_eq!(config.analytics.max_stored_events, 100);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NOOVA__CONSENT__EXPIRY_DAYS", "30");
        env::set_var("NOOVA__STORAGE__BACKEND", "file");
        env::set_var("NOOVA__STORAGE__DATA_DIR", "/tmp/noova-test");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.consent.expiry_days, 30);
        assert!(config.storage.is_file_backed());
        assert_eq!(
            config.storage.data_dir,
            std::path::PathBuf::from("/tmp/noova-test")
        );
    }

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_cross_section_key_collision() {
        let mut config = AppConfig::default();
        config.preferences.storage_key = config.analytics.stats_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_default_targets_this_crate() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "noova_privacy=info");
    }
}
