//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, events, errors)
//! - `consent` - Consent record, banner/modal flow, and the consent event
//! - `analytics` - Browsing session and aggregated usage statistics
//! - `preferences` - Preference document vocabulary and theme

pub mod analytics;
pub mod consent;
pub mod foundation;
pub mod preferences;
