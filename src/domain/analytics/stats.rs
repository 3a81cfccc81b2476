//! Aggregated usage statistics.
//!
//! One `UsageStats` document per origin, persisted as JSON. Counters
//! only grow; the sole way down is an explicit clear, which deletes the
//! whole document rather than mutating it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Timestamp;

/// How many custom events a stats document retains (most recent first out).
pub const MAX_STORED_EVENTS: usize = 100;

/// How many pages the readable report lists.
const TOP_PAGES_LIMIT: usize = 5;

/// One custom interaction event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEvent {
    /// Grouping key (e.g., "contact").
    pub category: String,

    /// What happened (e.g., "form_submitted").
    pub action: String,

    /// Optional qualifier; empty when the caller gave none.
    #[serde(default)]
    pub label: String,

    /// When the event was recorded.
    pub timestamp: Timestamp,
}

impl TrackedEvent {
    /// Creates an event, treating a missing label as empty.
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<String>,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.unwrap_or_default(),
            timestamp: occurred_at,
        }
    }
}

/// Aggregated usage counters for one origin.
///
/// # Invariants
///
/// - `total_page_views` equals the sum of per-path counts
/// - `events` holds at most the configured cap, oldest dropped first
/// - `first_visit` never changes after the document is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Lifetime page view count.
    total_page_views: u64,

    /// Lifetime session count.
    total_sessions: u64,

    /// Per-path view counts.
    pages: BTreeMap<String, u64>,

    /// Most recent custom events, oldest first.
    events: Vec<TrackedEvent>,

    /// When this document was first created.
    first_visit: Timestamp,

    /// When this document was last written.
    ///
    /// Early documents were written without this field; reads default it.
    #[serde(default = "Timestamp::now")]
    last_updated: Timestamp,
}

impl UsageStats {
    /// Creates an empty stats document.
    ///
    /// This is what a visitor's very first page view starts from, and
    /// what a malformed stored document falls back to.
    pub fn empty(first_visit: Timestamp) -> Self {
        Self {
            total_page_views: 0,
            total_sessions: 0,
            pages: BTreeMap::new(),
            events: Vec::new(),
            first_visit,
            last_updated: first_visit,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the lifetime page view count.
    pub fn total_page_views(&self) -> u64 {
        self.total_page_views
    }

    /// Returns the lifetime session count.
    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    /// Returns the per-path view counts.
    pub fn pages(&self) -> &BTreeMap<String, u64> {
        &self.pages
    }

    /// Returns the view count for one path.
    pub fn views_for(&self, path: &str) -> u64 {
        self.pages.get(path).copied().unwrap_or(0)
    }

    /// Returns the retained custom events, oldest first.
    pub fn events(&self) -> &[TrackedEvent] {
        &self.events
    }

    /// Returns when this document was first created.
    pub fn first_visit(&self) -> &Timestamp {
        &self.first_visit
    }

    /// Returns when this document was last written.
    pub fn last_updated(&self) -> &Timestamp {
        &self.last_updated
    }

    /// Returns the most-viewed paths, highest count first, capped for
    /// the readable report. Ties break by path for stable output.
    pub fn top_pages(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> =
            self.pages.iter().map(|(p, c)| (p.clone(), *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(TOP_PAGES_LIMIT);
        entries
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Counts one view of the given path.
    pub fn record_page_view(&mut self, path: impl Into<String>) {
        self.total_page_views += 1;
        *self.pages.entry(path.into()).or_insert(0) += 1;
    }

    /// Counts one new session.
    pub fn record_session(&mut self) {
        self.total_sessions += 1;
    }

    /// Appends a custom event, dropping the oldest past `max_stored`.
    pub fn record_event(&mut self, event: TrackedEvent, max_stored: usize) {
        self.events.push(event);
        if self.events.len() > max_stored {
            let excess = self.events.len() - max_stored;
            self.events.drain(..excess);
        }
    }

    /// Stamps the document as written now. Called on every save.
    pub fn mark_updated(&mut self, now: Timestamp) {
        self.last_updated = now;
    }
}

/// Human-readable projection of `UsageStats` for the debug surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total_page_views: u64,
    pub total_sessions: u64,
    pub tracked_events: usize,
    pub first_visit: Timestamp,
    pub last_updated: Timestamp,
    pub top_pages: Vec<(String, u64)>,
}

impl StatsReport {
    /// Builds the report from a stats document.
    pub fn from_stats(stats: &UsageStats) -> Self {
        Self {
            total_page_views: stats.total_page_views(),
            total_sessions: stats.total_sessions(),
            tracked_events: stats.events().len(),
            first_visit: *stats.first_visit(),
            last_updated: *stats.last_updated(),
            top_pages: stats.top_pages(),
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Page Views: {}", self.total_page_views)?;
        writeln!(f, "Total Sessions: {}", self.total_sessions)?;
        writeln!(f, "Tracked Events: {}", self.tracked_events)?;
        writeln!(
            f,
            "First Visit: {}",
            self.first_visit.as_datetime().format("%Y-%m-%d")
        )?;
        writeln!(
            f,
            "Last Updated: {}",
            self.last_updated.as_datetime().format("%Y-%m-%d")
        )?;
        if self.top_pages.is_empty() {
            write!(f, "Top Pages: none")
        } else {
            let listing: Vec<String> = self
                .top_pages
                .iter()
                .map(|(path, count)| format!("{} ({} views)", path, count))
                .collect();
            write!(f, "Top Pages: {}", listing.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(n: usize) -> TrackedEvent {
        TrackedEvent::new("test", format!("action_{}", n), None, Timestamp::now())
    }

    #[test]
    fn empty_stats_have_zero_counters() {
        let stats = UsageStats::empty(Timestamp::now());
        assert_eq!(stats.total_page_views(), 0);
        assert_eq!(stats.total_sessions(), 0);
        assert!(stats.pages().is_empty());
        assert!(stats.events().is_empty());
    }

    #[test]
    fn empty_stats_stamp_first_visit() {
        let first_visit = Timestamp::now();
        let stats = UsageStats::empty(first_visit);
        assert_eq!(stats.first_visit(), &first_visit);
        assert_eq!(stats.last_updated(), &first_visit);
    }

    #[test]
    fn record_page_view_updates_total_and_per_path() {
        let mut stats = UsageStats::empty(Timestamp::now());
        stats.record_page_view("/");
        stats.record_page_view("/");
        stats.record_page_view("/portfolio");

        assert_eq!(stats.total_page_views(), 3);
        assert_eq!(stats.views_for("/"), 2);
        assert_eq!(stats.views_for("/portfolio"), 1);
        assert_eq!(stats.views_for("/missing"), 0);
    }

    #[test]
    fn record_session_increments_count() {
        let mut stats = UsageStats::empty(Timestamp::now());
        stats.record_session();
        stats.record_session();
        assert_eq!(stats.total_sessions(), 2);
    }

    #[test]
    fn record_event_keeps_newest_at_cap() {
        let mut stats = UsageStats::empty(Timestamp::now());
        for n in 0..150 {
            stats.record_event(event(n), MAX_STORED_EVENTS);
        }

        assert_eq!(stats.events().len(), MAX_STORED_EVENTS);
        assert_eq!(stats.events()[0].action, "action_50");
        assert_eq!(stats.events()[99].action, "action_149");
    }

    #[test]
    fn record_event_preserves_order_below_cap() {
        let mut stats = UsageStats::empty(Timestamp::now());
        for n in 0..5 {
            stats.record_event(event(n), MAX_STORED_EVENTS);
        }

        let actions: Vec<&str> = stats.events().iter().map(|e| e.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["action_0", "action_1", "action_2", "action_3", "action_4"]
        );
    }

    #[test]
    fn tracked_event_defaults_missing_label_to_empty() {
        let e = TrackedEvent::new("contact", "form_submitted", None, Timestamp::now());
        assert_eq!(e.label, "");

        let e = TrackedEvent::new("contact", "form_submitted", Some("footer".into()), Timestamp::now());
        assert_eq!(e.label, "footer");
    }

    #[test]
    fn mark_updated_moves_last_updated_only() {
        let first_visit = Timestamp::now();
        let mut stats = UsageStats::empty(first_visit);
        let later = first_visit.add_days(1);

        stats.mark_updated(later);
        assert_eq!(stats.last_updated(), &later);
        assert_eq!(stats.first_visit(), &first_visit);
    }

    #[test]
    fn top_pages_sorts_by_count_descending() {
        let mut stats = UsageStats::empty(Timestamp::now());
        for _ in 0..3 {
            stats.record_page_view("/popular");
        }
        stats.record_page_view("/rare");
        for _ in 0..2 {
            stats.record_page_view("/middle");
        }

        let top = stats.top_pages();
        assert_eq!(top[0], ("/popular".to_string(), 3));
        assert_eq!(top[1], ("/middle".to_string(), 2));
        assert_eq!(top[2], ("/rare".to_string(), 1));
    }

    #[test]
    fn top_pages_caps_at_five() {
        let mut stats = UsageStats::empty(Timestamp::now());
        for n in 0..8 {
            stats.record_page_view(format!("/page-{}", n));
        }
        assert_eq!(stats.top_pages().len(), 5);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let stats = UsageStats::empty(Timestamp::now());
        let json = serde_json::to_string(&stats).unwrap();

        assert!(json.contains("\"totalPageViews\""));
        assert!(json.contains("\"totalSessions\""));
        assert!(json.contains("\"firstVisit\""));
        assert!(json.contains("\"lastUpdated\""));
    }

    #[test]
    fn deserializes_document_without_last_updated() {
        let json = r#"{
            "totalPageViews": 4,
            "totalSessions": 1,
            "pages": {"/": 4},
            "events": [],
            "firstVisit": "2024-01-15T10:30:00Z"
        }"#;
        let stats: UsageStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_page_views(), 4);
        assert_eq!(stats.views_for("/"), 4);
    }

    #[test]
    fn round_trips_through_json() {
        let mut stats = UsageStats::empty(Timestamp::now());
        stats.record_page_view("/");
        stats.record_session();
        stats.record_event(event(1), MAX_STORED_EVENTS);

        let json = serde_json::to_string(&stats).unwrap();
        let restored: UsageStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
    }

    #[test]
    fn report_reflects_stats() {
        let mut stats = UsageStats::empty(Timestamp::now());
        stats.record_page_view("/");
        stats.record_page_view("/");
        stats.record_session();
        stats.record_event(event(1), MAX_STORED_EVENTS);

        let report = StatsReport::from_stats(&stats);
        assert_eq!(report.total_page_views, 2);
        assert_eq!(report.total_sessions, 1);
        assert_eq!(report.tracked_events, 1);
        assert_eq!(report.top_pages, vec![("/".to_string(), 2)]);
    }

    #[test]
    fn report_displays_each_line() {
        let mut stats = UsageStats::empty(Timestamp::now());
        stats.record_page_view("/portfolio");
        let report = StatsReport::from_stats(&stats);
        let rendered = format!("{}", report);

        assert!(rendered.contains("Total Page Views: 1"));
        assert!(rendered.contains("Total Sessions: 0"));
        assert!(rendered.contains("Top Pages: /portfolio (1 views)"));
    }

    #[test]
    fn report_displays_none_for_empty_pages() {
        let report = StatsReport::from_stats(&UsageStats::empty(Timestamp::now()));
        assert!(format!("{}", report).ends_with("Top Pages: none"));
    }

    proptest! {
        #[test]
        fn event_cap_always_keeps_newest(total in 0usize..400, cap in 1usize..150) {
            let mut stats = UsageStats::empty(Timestamp::now());
            for n in 0..total {
                stats.record_event(event(n), cap);
            }

            prop_assert!(stats.events().len() <= cap);
            prop_assert_eq!(stats.events().len(), total.min(cap));
            if total > 0 {
                let newest = stats.events().last().unwrap();
                let expected = format!("action_{}", total - 1);
                prop_assert_eq!(newest.action.as_str(), expected.as_str());
            }
        }
    }
}
