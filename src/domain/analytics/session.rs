//! Browsing session entity.
//!
//! A session covers one tab from open to close. It lives in tab-scoped
//! storage, so closing the tab ends it implicitly; nothing ever expires
//! a session in place.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

/// Referrer recorded when the opening page reports none.
pub const DIRECT_REFERRER: &str = "direct";

/// One page viewed during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVisit {
    /// Path of the page (e.g., "/portfolio").
    pub path: String,

    /// Document title at visit time.
    pub title: String,

    /// When the page was viewed.
    pub timestamp: Timestamp,
}

/// Browsing session for a single tab.
///
/// # Invariants
///
/// - `pages` grows append-only for the life of the tab
/// - `referrer` is never empty; pages opened directly record "direct"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Best-effort unique session id.
    id: SessionId,

    /// When the tab opened.
    start_time: Timestamp,

    /// Pages viewed so far, in order.
    pages: Vec<PageVisit>,

    /// Where the visitor came from, or "direct".
    referrer: String,
}

impl SessionRecord {
    /// Starts a new session.
    ///
    /// An absent or empty referrer is recorded as "direct".
    pub fn start(started_at: Timestamp, referrer: Option<String>) -> Self {
        let referrer = referrer
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DIRECT_REFERRER.to_string());

        Self {
            id: SessionId::generate(started_at),
            start_time: started_at,
            pages: Vec::new(),
            referrer,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns when the tab opened.
    pub fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    /// Returns the pages viewed so far.
    pub fn pages(&self) -> &[PageVisit] {
        &self.pages
    }

    /// Returns the number of pages viewed.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the recorded referrer.
    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a page visit.
    pub fn record_visit(
        &mut self,
        path: impl Into<String>,
        title: impl Into<String>,
        visited_at: Timestamp,
    ) {
        self.pages.push(PageVisit {
            path: path.into(),
            title: title.into(),
            timestamp: visited_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_records_referrer() {
        let session = SessionRecord::start(Timestamp::now(), Some("https://search.example".into()));
        assert_eq!(session.referrer(), "https://search.example");
    }

    #[test]
    fn start_without_referrer_records_direct() {
        let session = SessionRecord::start(Timestamp::now(), None);
        assert_eq!(session.referrer(), DIRECT_REFERRER);
    }

    #[test]
    fn start_with_empty_referrer_records_direct() {
        let session = SessionRecord::start(Timestamp::now(), Some(String::new()));
        assert_eq!(session.referrer(), DIRECT_REFERRER);
    }

    #[test]
    fn new_session_has_no_pages() {
        let session = SessionRecord::start(Timestamp::now(), None);
        assert!(session.pages().is_empty());
        assert_eq!(session.page_count(), 0);
    }

    #[test]
    fn record_visit_appends_in_order() {
        let mut session = SessionRecord::start(Timestamp::now(), None);
        session.record_visit("/", "Home", Timestamp::now());
        session.record_visit("/portfolio", "Portfolio", Timestamp::now());

        assert_eq!(session.page_count(), 2);
        assert_eq!(session.pages()[0].path, "/");
        assert_eq!(session.pages()[1].path, "/portfolio");
        assert_eq!(session.pages()[1].title, "Portfolio");
    }

    #[test]
    fn session_id_embeds_start_time() {
        let started_at = Timestamp::from_unix_millis(1_705_276_800_000);
        let session = SessionRecord::start(started_at, None);
        assert!(session.id().as_str().contains("1705276800000"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let session = SessionRecord::start(Timestamp::now(), None);
        let json = serde_json::to_string(&session).unwrap();

        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"pages\""));
        assert!(json.contains("\"referrer\""));
        assert!(!json.contains("start_time"));
    }

    #[test]
    fn round_trips_through_json() {
        let mut session = SessionRecord::start(Timestamp::now(), Some("https://a.example".into()));
        session.record_visit("/", "Home", Timestamp::now());

        let json = serde_json::to_string(&session).unwrap();
        let restored: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
