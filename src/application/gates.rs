//! Feature gates - Event handlers that follow consent decisions.
//!
//! Each gated service gets one handler, subscribed once at startup to
//! the consent-updated channel. The handlers read the full record from
//! the payload and turn their service on or off; they never consult
//! storage themselves.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::consent::ConsentUpdated;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventHandler;

use super::analytics_recorder::AnalyticsRecorder;
use super::preferences::PreferencesStore;

/// Follows the `analytics` flag of every consent decision.
pub struct AnalyticsGate {
    recorder: Arc<AnalyticsRecorder>,
}

impl AnalyticsGate {
    pub fn new(recorder: Arc<AnalyticsRecorder>) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl EventHandler for AnalyticsGate {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        // 1. Decode the full record from the payload
        let update: ConsentUpdated = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::MalformedPayload, e.to_string()))?;

        // 2. Follow the analytics flag
        if update.consent.analytics() {
            self.recorder
                .enable()
                .await
                .map_err(|e| DomainError::new(ErrorCode::StorageFailure, e.to_string()))?;
        } else {
            self.recorder.disable();
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AnalyticsGate"
    }
}

/// Follows the `functional` flag of every consent decision.
pub struct PreferencesGate {
    preferences: Arc<PreferencesStore>,
}

impl PreferencesGate {
    pub fn new(preferences: Arc<PreferencesStore>) -> Self {
        Self { preferences }
    }
}

#[async_trait]
impl EventHandler for PreferencesGate {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let update: ConsentUpdated = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::MalformedPayload, e.to_string()))?;

        if update.consent.functional() {
            self.preferences
                .enable()
                .await
                .map_err(|e| DomainError::new(ErrorCode::StorageFailure, e.to_string()))?;
        } else {
            self.preferences.disable();
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "PreferencesGate"
    }
}
