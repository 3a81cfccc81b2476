//! Analytics domain module.
//!
//! Pure types for locally-held usage measurement: the per-tab browsing
//! session and the per-origin aggregate counters. Collection gating
//! lives in the application layer; these types never check consent.

mod session;
mod stats;

pub use session::{PageVisit, SessionRecord, DIRECT_REFERRER};
pub use stats::{StatsReport, TrackedEvent, UsageStats, MAX_STORED_EVENTS};
