//! Visitor preferences configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Visitor preferences storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// Origin-scoped key for the preference document
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl PreferencesConfig {
    /// Validate preferences configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage_key.is_empty() {
            return Err(ValidationError::MissingRequired("PREFERENCES_STORAGE_KEY"));
        }
        Ok(())
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    "noova_preferences".to_string()
}
