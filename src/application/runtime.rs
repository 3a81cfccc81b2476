//! PrivacyRuntime - Wires the consent subsystem for one page load.
//!
//! Builds the gated services from the given ports, subscribes their
//! gates to the consent-updated channel, and exposes the controller's
//! actions plus a few narrow accessors for collaborating page code.
//! Construction wires everything; `on_page_load` then resolves the
//! stored decision, which is what first enables the services.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::analytics::{StatsReport, MAX_STORED_EVENTS};
use crate::domain::consent::{ConsentError, ConsentRecord, CookieCategory, CONSENT_UPDATED};
use crate::ports::{
    ConsentStore, ConsentSurface, EventPublisher, EventSubscriber, KeyValueStore, PageContext,
    StorageError, ThemeSwitcher,
};

use super::analytics_recorder::AnalyticsRecorder;
use super::consent_controller::ConsentController;
use super::gates::{AnalyticsGate, PreferencesGate};
use super::preferences::PreferencesStore;

/// Storage keys and timings the runtime is wired with.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Cookie the consent record is persisted under.
    pub cookie_name: String,
    /// Cosmetic delay before the banner prompts.
    pub banner_delay: Duration,
    /// Origin-scoped key for the stats document.
    pub stats_key: String,
    /// Tab-scoped key for the session document.
    pub session_key: String,
    /// Origin-scoped key for the preference document.
    pub preferences_key: String,
    /// Cap on stored interaction events.
    pub max_stored_events: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            cookie_name: "noova_cookie_consent".to_string(),
            banner_delay: Duration::from_millis(500),
            stats_key: "noova_analytics".to_string(),
            session_key: "noova_session".to_string(),
            preferences_key: "noova_preferences".to_string(),
            max_stored_events: MAX_STORED_EVENTS,
        }
    }
}

/// The wired consent subsystem.
pub struct PrivacyRuntime {
    controller: ConsentController,
    recorder: Arc<AnalyticsRecorder>,
    preferences: Arc<PreferencesStore>,
}

impl PrivacyRuntime {
    /// Wires services, gates, and controller from the given ports.
    ///
    /// `local_store` holds the origin-scoped documents (stats,
    /// preferences); `session_store` holds the tab session. Pass the
    /// same bus as `publisher` and `subscriber`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        consent_store: Arc<dyn ConsentStore>,
        local_store: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        publisher: Arc<dyn EventPublisher>,
        subscriber: Arc<dyn EventSubscriber>,
        surface: Arc<dyn ConsentSurface>,
        page: Arc<dyn PageContext>,
        theme: Arc<dyn ThemeSwitcher>,
        settings: RuntimeSettings,
    ) -> Self {
        let recorder = Arc::new(AnalyticsRecorder::new(
            local_store.clone(),
            session_store,
            page.clone(),
            settings.stats_key,
            settings.session_key,
            settings.max_stored_events,
        ));
        let preferences = Arc::new(PreferencesStore::new(
            local_store,
            page,
            theme,
            settings.preferences_key,
        ));

        subscriber.subscribe(
            CONSENT_UPDATED,
            Arc::new(AnalyticsGate::new(recorder.clone())),
        );
        subscriber.subscribe(
            CONSENT_UPDATED,
            Arc::new(PreferencesGate::new(preferences.clone())),
        );

        let controller = ConsentController::new(
            consent_store,
            surface,
            publisher,
            settings.cookie_name,
            settings.banner_delay,
        );

        Self {
            controller,
            recorder,
            preferences,
        }
    }

    // ───────────────────────────────────────────────
    // Controller actions
    // ───────────────────────────────────────────────

    /// Resolves the stored decision or prompts the banner.
    pub async fn on_page_load(&mut self) -> Result<(), ConsentError> {
        self.controller.on_page_load().await
    }

    /// Grants every category.
    pub async fn accept_all(&mut self) -> Result<(), ConsentError> {
        self.controller.accept_all().await
    }

    /// Refuses every configurable category.
    pub async fn reject_all(&mut self) -> Result<(), ConsentError> {
        self.controller.reject_all().await
    }

    /// Commits whatever the category toggles show.
    pub async fn save_selected(&mut self) -> Result<(), ConsentError> {
        self.controller.save_selected().await
    }

    /// Opens the settings modal.
    pub fn open_settings(&mut self) {
        self.controller.open_settings();
    }

    /// Closes the settings modal.
    pub fn close_settings(&mut self) {
        self.controller.close_settings();
    }

    // ───────────────────────────────────────────────
    // Accessors for collaborating page code
    // ───────────────────────────────────────────────

    /// Whether the page renders the consent UI.
    pub fn ui_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Whether the visitor granted the given category.
    pub fn has_consent(&self, category: CookieCategory) -> bool {
        self.controller.has_consent(category)
    }

    /// The decision in effect, if any.
    pub fn consent(&self) -> Option<&ConsentRecord> {
        self.controller.consent()
    }

    /// Handle for tracking interaction events from page code.
    pub fn recorder(&self) -> &Arc<AnalyticsRecorder> {
        &self.recorder
    }

    /// Handle for reading and writing visitor preferences.
    pub fn preferences(&self) -> &Arc<PreferencesStore> {
        &self.preferences
    }

    /// The readable stats summary.
    pub async fn stats_report(&self) -> Result<StatsReport, StorageError> {
        self.recorder.report().await
    }

    /// Erases every locally stored document: stats, tab session, and
    /// preferences. The consent decision itself stays.
    pub async fn clear_all_data(&self) -> Result<(), StorageError> {
        self.recorder.clear_data().await?;
        self.preferences.clear_data().await?;
        Ok(())
    }
}
