//! Event infrastructure.
//!
//! The consent subsystem coordinates through events: a decision is
//! persisted, then broadcast, and the gated services react to the
//! broadcast rather than to direct calls. This module provides the
//! transport pieces:
//! - `EventEnvelope` - Wire form of an event, payload plus routing data
//! - `EventId` / `EventMetadata` - Deduplication and page-load context
//! - `DomainEvent` - Contract every published event satisfies
//! - `domain_event!` - Implements the contract from field mappings
//!
//! Envelopes carry no visitor identity. The subsystem is anonymous by
//! design, so the only context an event gets is which page load
//! produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

// ============================================
// EventId
// ============================================

/// Unique identifier for one event instance.
///
/// Stored as a string so envelopes read back from storage keep their
/// original ids byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================
// EventMetadata
// ============================================

/// Context attached to an envelope beyond the payload itself.
///
/// One page load can raise several events; `page_load_id` ties them
/// together so a log or a stored event stream can be grouped by load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Identifier shared by every event of a single page load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_load_id: Option<String>,
}

// ============================================
// EventEnvelope
// ============================================

/// Wire form of a domain event.
///
/// The payload is the serialized event; everything else is routing and
/// bookkeeping: `event_type` for subscription matching, `event_id` for
/// deduplication, `occurred_at` for ordering, `schema_version` for
/// readers that must handle several payload shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id of this event instance.
    pub event_id: EventId,

    /// Type string subscriptions match on (e.g., "consent.updated.v1").
    pub event_type: String,

    /// Payload schema version, parsed from the event type suffix.
    pub schema_version: u32,

    /// Id of the aggregate that raised the event.
    pub aggregate_id: String,

    /// Kind of aggregate (e.g., "ConsentFlow").
    pub aggregate_type: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// The serialized event.
    pub payload: JsonValue,

    /// Page-load context.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Builds an envelope around a raw payload.
    ///
    /// The schema version is parsed from the `.vN` suffix of the event
    /// type; a type without a suffix counts as version 1.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        let schema_version = Self::extract_version(&event_type);

        Self {
            event_id: EventId::new(),
            event_type,
            schema_version,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    /// Parses the `.vN` suffix of an event type, defaulting to 1.
    pub(crate) fn extract_version(event_type: &str) -> u32 {
        event_type
            .rsplit_once(".v")
            .and_then(|(_, version)| version.parse::<u32>().ok())
            .unwrap_or(1)
    }

    /// Deserializes the payload into a concrete event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

// ============================================
// DomainEvent
// ============================================

/// Contract every published domain event satisfies.
///
/// Implement it through the `domain_event!` macro; the handwritten
/// form exists only for test doubles.
pub trait DomainEvent: Send + Sync {
    /// Type string used for routing, with a `.vN` version suffix.
    fn event_type(&self) -> &'static str;

    /// Payload schema version. Must agree with the type suffix.
    fn schema_version(&self) -> u32;

    /// Id of the aggregate that raised the event.
    fn aggregate_id(&self) -> String;

    /// Kind of aggregate.
    fn aggregate_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Unique id of this event instance.
    fn event_id(&self) -> EventId;
}

/// Adds `to_envelope` to events that can serialize themselves.
///
/// Blanket-implemented, so a `DomainEvent` that derives `Serialize`
/// needs nothing further to go on the wire.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Wraps the event in an envelope, serializing it as the payload.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            schema_version: self.schema_version(),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements `DomainEvent` by mapping trait methods onto fields.
///
/// # Example
///
/// ```ignore
/// domain_event!(
///     ConsentUpdated,
///     event_type = "consent.updated.v1",
///     schema_version = 1,
///     aggregate_id = cookie_name,
///     aggregate_type = "ConsentFlow",
///     occurred_at = updated_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        schema_version = $schema_version:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn schema_version(&self) -> u32 {
                $schema_version
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use domain_event;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct BannerDismissed {
        event_id: EventId,
        cookie_name: String,
        dismissed_at: Timestamp,
    }

    domain_event!(
        BannerDismissed,
        event_type = "banner.dismissed.v1",
        schema_version = 1,
        aggregate_id = cookie_name,
        aggregate_type = "ConsentFlow",
        occurred_at = dismissed_at,
        event_id = event_id
    );

    fn dismissed() -> BannerDismissed {
        BannerDismissed {
            event_id: EventId::new(),
            cookie_name: "noova_cookie_consent".to_string(),
            dismissed_at: Timestamp::now(),
        }
    }

    #[test]
    fn event_ids_are_unique() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn event_id_serializes_as_bare_string() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, format!("\"{}\"", id.as_str()));
    }

    #[test]
    fn metadata_defaults_to_no_page_load() {
        assert_eq!(EventMetadata::default().page_load_id, None);
    }

    #[test]
    fn metadata_omits_absent_page_load_from_json() {
        let json = serde_json::to_string(&EventMetadata::default()).unwrap();

        assert_eq!(json, "{}");
    }

    #[test]
    fn metadata_round_trips_page_load_id() {
        let meta = EventMetadata {
            page_load_id: Some("load-7".to_string()),
        };

        let json = serde_json::to_string(&meta).unwrap();
        let restored: EventMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, meta);
    }

    #[test]
    fn envelope_new_parses_version_from_type_suffix() {
        let envelope = EventEnvelope::new("consent.updated.v3", "agg", "ConsentFlow", json!({}));

        assert_eq!(envelope.schema_version, 3);
    }

    #[test]
    fn envelope_without_version_suffix_counts_as_v1() {
        let envelope = EventEnvelope::new("legacy.event", "agg", "Legacy", json!({}));

        assert_eq!(envelope.schema_version, 1);
    }

    #[test]
    fn envelope_payload_as_deserializes_matching_shape() {
        #[derive(Deserialize)]
        struct Payload {
            analytics: bool,
        }

        let envelope = EventEnvelope::new(
            "consent.updated.v1",
            "noova_cookie_consent",
            "ConsentFlow",
            json!({"analytics": true}),
        );

        let payload: Payload = envelope.payload_as().unwrap();
        assert!(payload.analytics);
    }

    #[test]
    fn envelope_payload_as_rejects_mismatched_shape() {
        #[derive(Deserialize)]
        #[allow(dead_code)]
        struct Payload {
            required: String,
        }

        let envelope = EventEnvelope::new("test.v1", "agg", "Test", json!({"other": 1}));

        let result: Result<Payload, _> = envelope.payload_as();
        assert!(result.is_err());
    }

    #[test]
    fn envelope_serde_round_trips() {
        let envelope = EventEnvelope::new(
            "consent.updated.v1",
            "noova_cookie_consent",
            "ConsentFlow",
            json!({"functional": false}),
        );

        let json = serde_json::to_string(&envelope).unwrap();
        let restored: EventEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.event_id, envelope.event_id);
        assert_eq!(restored.event_type, envelope.event_type);
        assert_eq!(restored.occurred_at, envelope.occurred_at);
        assert_eq!(restored.payload, envelope.payload);
    }

    #[test]
    fn macro_maps_trait_methods_onto_fields() {
        let event = dismissed();

        assert_eq!(event.event_type(), "banner.dismissed.v1");
        assert_eq!(event.schema_version(), 1);
        assert_eq!(event.aggregate_id(), "noova_cookie_consent");
        assert_eq!(event.aggregate_type(), "ConsentFlow");
        assert_eq!(event.occurred_at(), event.dismissed_at);
    }

    #[test]
    fn to_envelope_serializes_the_event_as_payload() {
        let event = dismissed();

        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id, event.event_id);
        assert_eq!(envelope.event_type, "banner.dismissed.v1");
        assert_eq!(envelope.occurred_at, event.dismissed_at);
        assert_eq!(
            envelope.payload["cookie_name"],
            json!("noova_cookie_consent")
        );
    }

    #[test]
    fn to_envelope_payload_round_trips() {
        let event = dismissed();

        let restored: BannerDismissed = event.to_envelope().payload_as().unwrap();

        assert_eq!(restored.event_id, event.event_id);
        assert_eq!(restored.cookie_name, event.cookie_name);
    }

    #[test]
    fn trait_version_agrees_with_type_suffix() {
        let event = dismissed();

        assert_eq!(
            event.schema_version(),
            EventEnvelope::extract_version(event.event_type())
        );
    }
}
