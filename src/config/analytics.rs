//! Local analytics configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Local analytics storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Origin-scoped key for the aggregate stats document
    #[serde(default = "default_stats_key")]
    pub stats_key: String,

    /// Tab-scoped key for the browsing session document
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Cap on stored interaction events, oldest dropped first
    #[serde(default = "default_max_stored_events")]
    pub max_stored_events: usize,
}

impl AnalyticsConfig {
    /// Validate analytics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stats_key.is_empty() {
            return Err(ValidationError::MissingRequired("ANALYTICS_STATS_KEY"));
        }
        if self.session_key.is_empty() {
            return Err(ValidationError::MissingRequired("ANALYTICS_SESSION_KEY"));
        }
        if self.stats_key == self.session_key {
            return Err(ValidationError::DuplicateStorageKey);
        }
        if self.max_stored_events == 0 {
            return Err(ValidationError::InvalidEventCap);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            stats_key: default_stats_key(),
            session_key: default_session_key(),
            max_stored_events: default_max_stored_events(),
        }
    }
}

fn default_stats_key() -> String {
    "noova_analytics".to_string()
}

fn default_session_key() -> String {
    "noova_session".to_string()
}

fn default_max_stored_events() -> usize {
    100
}
