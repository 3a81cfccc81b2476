//! Application layer - Consent-gated services and their wiring.
//!
//! This layer orchestrates the domain through ports: the controller
//! captures decisions, the gates relay them over the event bus, and
//! the two gated services act on them. Nothing here touches a concrete
//! adapter; composition happens at the binary's edge.

pub mod analytics_recorder;
pub mod consent_controller;
pub mod gates;
pub mod preferences;
pub mod runtime;

pub use analytics_recorder::AnalyticsRecorder;
pub use consent_controller::ConsentController;
pub use gates::{AnalyticsGate, PreferencesGate};
pub use preferences::PreferencesStore;
pub use runtime::{PrivacyRuntime, RuntimeSettings};
