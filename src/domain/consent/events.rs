//! Consent domain events.
//!
//! A single event type coordinates the whole subsystem:
//! - `ConsentUpdated` - Published after every decision is persisted
//!
//! The event carries the full record, not a delta, so subscribers can set
//! their state from the payload alone without re-reading storage.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp};

use super::ConsentRecord;

/// Event type for consent decisions, used when subscribing.
pub const CONSENT_UPDATED: &str = "consent.updated.v1";

// ════════════════════════════════════════════════════════════════════════════
// ConsentUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a visitor's consent decision is applied.
///
/// Fires on every decision, including ones that repeat the previous
/// choices; subscribers are expected to be idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentUpdated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Name of the cookie the record was persisted under.
    pub cookie_name: String,

    /// The full decision now in effect.
    pub consent: ConsentRecord,

    /// When the decision was applied.
    pub updated_at: Timestamp,
}

domain_event!(
    ConsentUpdated,
    event_type = "consent.updated.v1",
    schema_version = 1,
    aggregate_id = cookie_name,
    aggregate_type = "ConsentFlow",
    occurred_at = updated_at,
    event_id = event_id
);

impl ConsentUpdated {
    /// Builds the event for a freshly applied record.
    pub fn for_record(cookie_name: impl Into<String>, consent: ConsentRecord) -> Self {
        Self {
            event_id: EventId::new(),
            cookie_name: cookie_name.into(),
            updated_at: *consent.timestamp(),
            consent,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Unit Tests
// ════════════════════════════════════════════════════════════════════════════
