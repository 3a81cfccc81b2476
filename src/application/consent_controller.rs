//! ConsentController - Drives the cookie consent banner and modal.
//!
//! Owns the per-page-load `ConsentFlow`, reads and writes the persisted
//! record through `ConsentStore`, and drives the visible anchors
//! through `ConsentSurface`. Every committed decision is persisted
//! first and broadcast afterwards, so subscribers never observe a
//! decision that storage does not hold.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::consent::{
    ConsentError, ConsentFlow, ConsentRecord, ConsentSelection, ConsentUpdated, CookieCategory,
};
use crate::domain::foundation::{SerializableDomainEvent, Timestamp};
use crate::ports::{ConsentStore, ConsentSurface, EventPublisher};

/// Captures and applies the visitor's cookie decision.
///
/// Constructed inactive when the surface reports no banner markup; an
/// inactive controller ignores UI verbs but still resolves and applies
/// a stored decision on page load, so consent-gated features keep
/// working on pages without the banner.
pub struct ConsentController {
    store: Arc<dyn ConsentStore>,
    surface: Arc<dyn ConsentSurface>,
    publisher: Arc<dyn EventPublisher>,
    cookie_name: String,
    banner_delay: Duration,
    flow: ConsentFlow,
    active: bool,
    page_load_id: String,
}

impl ConsentController {
    pub fn new(
        store: Arc<dyn ConsentStore>,
        surface: Arc<dyn ConsentSurface>,
        publisher: Arc<dyn EventPublisher>,
        cookie_name: impl Into<String>,
        banner_delay: Duration,
    ) -> Self {
        let active = surface.is_present();
        if !active {
            tracing::debug!("Consent banner markup not present, consent UI disabled");
        }
        Self {
            store,
            surface,
            publisher,
            cookie_name: cookie_name.into(),
            banner_delay,
            flow: ConsentFlow::new(),
            active,
            page_load_id: Uuid::new_v4().to_string(),
        }
    }

    /// Whether the page renders the consent UI at all.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The decision currently in effect, if one exists.
    pub fn consent(&self) -> Option<&ConsentRecord> {
        self.flow.consent()
    }

    /// Whether the visitor granted the given category.
    ///
    /// False until a decision exists.
    pub fn has_consent(&self, category: CookieCategory) -> bool {
        self.flow
            .consent()
            .map(|record| record.grants(category))
            .unwrap_or(false)
    }

    /// Resolves the flow for this page load.
    ///
    /// A stored decision is re-applied and broadcast; without one the
    /// banner prompts after the configured cosmetic delay. On a page
    /// without banner markup only the stored decision is applied.
    ///
    /// # Errors
    ///
    /// - `Storage` if reading the stored record fails
    /// - `InvalidState` if called twice on the same controller
    /// - `Delivery` if broadcasting the stored decision fails
    pub async fn on_page_load(&mut self) -> Result<(), ConsentError> {
        // 1. Consult storage
        let stored = self.store.load().await?;

        match stored {
            // 2a. Returning visitor: re-apply without prompting
            Some(record) => {
                self.flow.resolve_existing(record.clone())?;
                self.apply_consent(&record).await?;
                if self.active {
                    self.surface.show_settings_button();
                }
            }
            // 2b. No decision yet: prompt, unless the page cannot
            None => {
                if !self.active {
                    return Ok(());
                }
                self.flow.show_banner()?;
                tokio::time::sleep(self.banner_delay).await;
                self.surface.show_banner();
                self.surface.show_overlay();
            }
        }

        Ok(())
    }

    /// Commits a decision granting every category.
    ///
    /// # Errors
    ///
    /// - `Storage` if persisting fails; nothing is broadcast then
    /// - `Delivery` if the persisted decision cannot be broadcast
    pub async fn accept_all(&mut self) -> Result<(), ConsentError> {
        if !self.active {
            return Ok(());
        }
        tracing::info!("Visitor accepted all cookie categories");
        self.commit(ConsentRecord::accept_all(Timestamp::now())).await
    }

    /// Commits a decision refusing every configurable category.
    ///
    /// # Errors
    ///
    /// Same as [`accept_all`](Self::accept_all).
    pub async fn reject_all(&mut self) -> Result<(), ConsentError> {
        if !self.active {
            return Ok(());
        }
        tracing::info!("Visitor rejected configurable cookie categories");
        self.commit(ConsentRecord::reject_all(Timestamp::now())).await
    }

    /// Commits the decision currently shown on the category toggles.
    ///
    /// A toggle the page does not render counts as refused.
    ///
    /// # Errors
    ///
    /// Same as [`accept_all`](Self::accept_all).
    pub async fn save_selected(&mut self) -> Result<(), ConsentError> {
        if !self.active {
            return Ok(());
        }

        let selection = ConsentSelection {
            functional: self.toggle_or_refused(CookieCategory::Functional),
            analytics: self.toggle_or_refused(CookieCategory::Analytics),
            marketing: self.toggle_or_refused(CookieCategory::Marketing),
        };
        tracing::info!(
            functional = selection.functional,
            analytics = selection.analytics,
            marketing = selection.marketing,
            "Visitor saved a cookie selection"
        );
        self.commit(ConsentRecord::from_selection(selection, Timestamp::now()))
            .await
    }

    /// Opens the settings modal, pre-populating the toggles from the
    /// decision in effect.
    pub fn open_settings(&mut self) {
        if !self.active {
            return;
        }

        self.flow.open_modal();
        self.surface.open_modal();
        self.surface.show_overlay();

        if let Some(consent) = self.flow.consent() {
            let selection = consent.selection();
            self.surface
                .set_toggle(CookieCategory::Functional, selection.functional);
            self.surface
                .set_toggle(CookieCategory::Analytics, selection.analytics);
            self.surface
                .set_toggle(CookieCategory::Marketing, selection.marketing);
        }
    }

    /// Closes the settings modal.
    ///
    /// The shared overlay stays up while the banner is still prompting
    /// underneath.
    pub fn close_settings(&mut self) {
        if !self.active {
            return;
        }

        self.flow.close_modal();
        self.surface.close_modal();
        if !self.flow.banner_active() {
            self.surface.hide_overlay();
        }
    }

    // ───────────────────────────────────────────────
    // Private helpers
    // ───────────────────────────────────────────────

    /// The shared tail of every decision action.
    async fn commit(&mut self, record: ConsentRecord) -> Result<(), ConsentError> {
        // 1. Persist before anything observable changes
        self.store.save(&record).await?;

        // 2. Advance the flow
        self.flow.decide(record.clone());
        self.flow.close_modal();

        // 3. Retire the prompt surfaces
        self.surface.hide_banner();
        self.surface.hide_overlay();
        self.surface.close_modal();

        // 4. Put the decision into effect
        self.apply_consent(&record).await?;
        self.surface.show_settings_button();

        Ok(())
    }

    /// Runs the per-category hooks and broadcasts the full record.
    async fn apply_consent(&self, record: &ConsentRecord) -> Result<(), ConsentError> {
        if record.analytics() {
            tracing::info!("Analytics cookies granted, local tracking will run");
        }
        if record.marketing() {
            // No marketing scripts are integrated; the grant is recorded
            tracing::info!("Marketing cookies granted");
        }
        if record.functional() {
            tracing::info!("Functional cookies granted, preferences will be kept");
        }

        let event = ConsentUpdated::for_record(self.cookie_name.as_str(), record.clone());
        let mut envelope = event.to_envelope();
        envelope.metadata.page_load_id = Some(self.page_load_id.clone());
        self.publisher.publish(envelope).await?;
        Ok(())
    }

    fn toggle_or_refused(&self, category: CookieCategory) -> bool {
        self.surface.toggle_state(category).unwrap_or(false)
    }
}
