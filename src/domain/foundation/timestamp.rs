//! UTC timestamp value object.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, always UTC.
///
/// Serializes as an ISO-8601 string. Every persisted record in this
/// crate (consent cookie, stats, session) stores its timestamps in
/// that form, so corrupt or foreign values fail deserialization
/// instead of producing a bogus date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Out-of-range values fall back to the current moment rather
    /// than failing; a visit record with a slightly wrong time beats
    /// no record at all.
    pub fn from_unix_millis(millis: i64) -> Self {
        match Utc.timestamp_millis_opt(millis) {
            chrono::LocalResult::Single(dt) => Self(dt),
            _ => Self::now(),
        }
    }

    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner DateTime, for formatting.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the timestamp `days` later. Cookie expiry horizons are
    /// computed this way.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Returns the timestamp `days` earlier.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}
