//! AnalyticsRecorder - Local, privacy-preserving usage tracking.
//!
//! Counts page views, sessions, and interaction events entirely in
//! origin-local storage; nothing leaves the machine. The recorder only
//! writes while enabled, and the enable gate follows the visitor's
//! analytics consent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::analytics::{SessionRecord, StatsReport, TrackedEvent, UsageStats};
use crate::domain::foundation::Timestamp;
use crate::ports::{codec, KeyValueStore, PageContext, StorageError};

/// Records usage statistics while the analytics gate is open.
///
/// Two stores back the recorder: the stats document lives in the
/// origin-scoped store and survives restarts; the session document
/// lives in the tab-scoped store and ends with the tab.
pub struct AnalyticsRecorder {
    stats_store: Arc<dyn KeyValueStore>,
    session_store: Arc<dyn KeyValueStore>,
    page: Arc<dyn PageContext>,
    stats_key: String,
    session_key: String,
    max_stored_events: usize,
    enabled: AtomicBool,
}

impl AnalyticsRecorder {
    pub fn new(
        stats_store: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        page: Arc<dyn PageContext>,
        stats_key: impl Into<String>,
        session_key: impl Into<String>,
        max_stored_events: usize,
    ) -> Self {
        Self {
            stats_store,
            session_store,
            page,
            stats_key: stats_key.into(),
            session_key: session_key.into(),
            max_stored_events,
            enabled: AtomicBool::new(false),
        }
    }

    /// Whether the recorder is currently tracking.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Opens the gate and records the enabling page load.
    ///
    /// Idempotent: enabling an already-enabled recorder changes
    /// nothing. The page view is tracked before the session is
    /// started, so the enabling page is counted in the stats but not
    /// in the session's page list.
    pub async fn enable(&self) -> Result<(), StorageError> {
        if self.enabled.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.track_page_view().await?;
        self.start_session().await?;

        tracing::info!("Local analytics enabled");
        Ok(())
    }

    /// Closes the gate. Collected data stays in place.
    pub fn disable(&self) {
        if self.enabled.swap(false, Ordering::SeqCst) {
            tracing::info!("Local analytics disabled");
        }
    }

    /// Counts a view of the current page.
    ///
    /// No-op while disabled. The visit is appended to the tab session
    /// only when a readable session exists; the global counters are
    /// updated either way.
    pub async fn track_page_view(&self) -> Result<(), StorageError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let path = self.page.current_path();
        let title = self.page.current_title();
        let now = Timestamp::now();

        let raw = self.session_store.get(&self.session_key).await?;
        if let Some(mut session) = codec::decode_lenient::<SessionRecord>(&self.session_key, raw) {
            session.record_visit(path.clone(), title, now);
            self.save_session(&session).await?;
        }

        let mut stats = self.load_stats().await?;
        stats.record_page_view(path.clone());
        self.save_stats(&mut stats).await?;

        tracing::debug!(path = %path, "Tracked page view");
        Ok(())
    }

    /// Records an interaction event, keeping only the newest entries.
    ///
    /// No-op while disabled. A missing label is stored as empty.
    pub async fn track_event(
        &self,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<String>,
    ) -> Result<(), StorageError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let event = TrackedEvent::new(category, action, label, Timestamp::now());
        tracing::debug!(
            category = %event.category,
            action = %event.action,
            "Tracked event"
        );

        let mut stats = self.load_stats().await?;
        stats.record_event(event, self.max_stored_events);
        self.save_stats(&mut stats).await
    }

    /// Starts the tab session unless one is already running.
    ///
    /// No-op while disabled. A fresh session counts toward
    /// `total_sessions`; an unreadable stored session is replaced.
    pub async fn start_session(&self) -> Result<(), StorageError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let raw = self.session_store.get(&self.session_key).await?;
        if codec::decode_lenient::<SessionRecord>(&self.session_key, raw).is_some() {
            return Ok(());
        }

        let session = SessionRecord::start(Timestamp::now(), self.page.referrer());
        self.save_session(&session).await?;

        let mut stats = self.load_stats().await?;
        stats.record_session();
        self.save_stats(&mut stats).await?;

        tracing::debug!(session_id = %session.id(), "Started session");
        Ok(())
    }

    /// Removes the stats document and the tab session.
    ///
    /// Works regardless of the gate, so a visitor can always erase
    /// what was collected.
    pub async fn clear_data(&self) -> Result<(), StorageError> {
        self.stats_store.remove(&self.stats_key).await?;
        self.session_store.remove(&self.session_key).await?;
        tracing::info!("Analytics data cleared");
        Ok(())
    }

    /// Builds the readable stats summary.
    ///
    /// Read-only, so it works regardless of the gate.
    pub async fn report(&self) -> Result<StatsReport, StorageError> {
        let stats = self.load_stats().await?;
        Ok(StatsReport::from_stats(&stats))
    }

    // ───────────────────────────────────────────────
    // Private helpers
    // ───────────────────────────────────────────────

    async fn load_stats(&self) -> Result<UsageStats, StorageError> {
        let raw = self.stats_store.get(&self.stats_key).await?;
        Ok(codec::decode_lenient(&self.stats_key, raw)
            .unwrap_or_else(|| UsageStats::empty(Timestamp::now())))
    }

    async fn save_stats(&self, stats: &mut UsageStats) -> Result<(), StorageError> {
        stats.mark_updated(Timestamp::now());
        let json = codec::encode(&self.stats_key, stats)?;
        self.stats_store.set(&self.stats_key, &json).await
    }

    async fn save_session(&self, session: &SessionRecord) -> Result<(), StorageError> {
        let json = codec::encode(&self.session_key, session)?;
        self.session_store.set(&self.session_key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::adapters::StaticPageContext;

    const STATS_KEY: &str = "noova_analytics";
    const SESSION_KEY: &str = "noova_session";

    fn recorder_with(
        stats_store: Arc<MemoryStore>,
        session_store: Arc<MemoryStore>,
        page: Arc<StaticPageContext>,
    ) -> AnalyticsRecorder {
        AnalyticsRecorder::new(
            stats_store,
            session_store,
            page,
            STATS_KEY,
            SESSION_KEY,
            100,
        )
    }

    async fn stored_stats(store: &MemoryStore) -> Option<UsageStats> {
        let raw = store.get(STATS_KEY).await.unwrap()?;
        Some(serde_json::from_str(&raw).unwrap())
    }

    async fn stored_session(store: &MemoryStore) -> Option<SessionRecord> {
        let raw = store.get(SESSION_KEY).await.unwrap()?;
        Some(serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn enable_tracks_one_page_view_and_one_session() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page);

        recorder.enable().await.unwrap();

        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.total_page_views(), 1);
        assert_eq!(stats.total_sessions(), 1);
        assert_eq!(stats.views_for("/"), 1);

        // Page view runs before the session exists, so the session's
        // own page list starts empty
        let session = stored_session(&session_store).await.unwrap();
        assert_eq!(session.page_count(), 0);
    }

    #[tokio::test]
    async fn re_enable_does_not_double_count() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store, page);

        recorder.enable().await.unwrap();
        recorder.enable().await.unwrap();

        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.total_page_views(), 1);
        assert_eq!(stats.total_sessions(), 1);
    }

    #[tokio::test]
    async fn disabled_recorder_writes_nothing() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page);

        recorder.track_page_view().await.unwrap();
        recorder
            .track_event("Button", "Click", Some("CTA".to_string()))
            .await
            .unwrap();
        recorder.start_session().await.unwrap();

        assert!(stored_stats(&stats_store).await.is_none());
        assert!(stored_session(&session_store).await.is_none());
    }

    #[tokio::test]
    async fn page_views_append_to_running_session() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page.clone());

        recorder.enable().await.unwrap();
        page.navigate_to("/about", "About - Noova");
        recorder.track_page_view().await.unwrap();

        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.total_page_views(), 2);
        assert_eq!(stats.views_for("/about"), 1);

        let session = stored_session(&session_store).await.unwrap();
        assert_eq!(session.page_count(), 1);
        assert_eq!(session.pages()[0].path, "/about");
    }

    #[tokio::test]
    async fn start_session_reuses_running_session() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page);

        recorder.enable().await.unwrap();
        let first = stored_session(&session_store).await.unwrap();

        recorder.start_session().await.unwrap();

        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.total_sessions(), 1);
        let second = stored_session(&session_store).await.unwrap();
        assert_eq!(second.id(), first.id());
    }

    #[tokio::test]
    async fn unreadable_session_is_replaced() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        session_store.set(SESSION_KEY, "{not json").await.unwrap();

        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page);

        recorder.enable().await.unwrap();

        let session = stored_session(&session_store).await.unwrap();
        assert_eq!(session.page_count(), 0);
        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.total_sessions(), 1);
    }

    #[tokio::test]
    async fn session_referrer_comes_from_page_context() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(
            StaticPageContext::new("/", "Noova").with_referrer("https://search.example/"),
        );
        let recorder = recorder_with(stats_store, session_store.clone(), page);

        recorder.enable().await.unwrap();

        let session = stored_session(&session_store).await.unwrap();
        assert_eq!(session.referrer(), "https://search.example/");
    }

    #[tokio::test]
    async fn tracked_event_stores_empty_label_when_missing() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store, page);

        recorder.enable().await.unwrap();
        recorder.track_event("Form", "Submit", None).await.unwrap();

        let stats = stored_stats(&stats_store).await.unwrap();
        assert_eq!(stats.events().len(), 1);
        assert_eq!(stats.events()[0].category, "Form");
        assert_eq!(stats.events()[0].label, "");
    }

    #[tokio::test]
    async fn clear_data_removes_stats_and_session() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store.clone(), session_store.clone(), page);

        recorder.enable().await.unwrap();
        recorder.disable();

        // Erasure ignores the gate
        recorder.clear_data().await.unwrap();

        assert!(stored_stats(&stats_store).await.is_none());
        assert!(stored_session(&session_store).await.is_none());
    }

    #[tokio::test]
    async fn report_reads_regardless_of_gate() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store, session_store, page);

        recorder.enable().await.unwrap();
        recorder.disable();

        let report = recorder.report().await.unwrap();
        assert_eq!(report.total_page_views, 1);
        assert_eq!(report.total_sessions, 1);
    }

    #[tokio::test]
    async fn report_on_empty_store_shows_zeroes() {
        let stats_store = Arc::new(MemoryStore::new());
        let session_store = Arc::new(MemoryStore::new());
        let page = Arc::new(StaticPageContext::new("/", "Noova"));
        let recorder = recorder_with(stats_store, session_store, page);

        let report = recorder.report().await.unwrap();
        assert_eq!(report.total_page_views, 0);
        assert_eq!(report.total_sessions, 0);
        assert_eq!(report.tracked_events, 0);
    }
}
