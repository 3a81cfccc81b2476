//! PreferencesStore - Consent-gated visitor preferences.
//!
//! A flat key-value document in origin-local storage, writable only
//! while the visitor has granted functional consent. Enabling the
//! store also applies what was remembered: the saved theme is applied
//! through the `ThemeSwitcher` port and the current page is recorded
//! as the place to pick up from next time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::domain::foundation::Timestamp;
use crate::domain::preferences::{PreferencesMap, Theme, LAST_PAGE_KEY, LAST_VISIT_KEY, THEME_KEY};
use crate::ports::{codec, KeyValueStore, PageContext, StorageError, ThemeSwitcher};

/// Stores visitor preferences while the functional gate is open.
pub struct PreferencesStore {
    store: Arc<dyn KeyValueStore>,
    page: Arc<dyn PageContext>,
    theme: Arc<dyn ThemeSwitcher>,
    storage_key: String,
    enabled: AtomicBool,
}

impl PreferencesStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        page: Arc<dyn PageContext>,
        theme: Arc<dyn ThemeSwitcher>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            page,
            theme,
            storage_key: storage_key.into(),
            enabled: AtomicBool::new(false),
        }
    }

    /// Whether the store currently accepts reads and writes.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Opens the gate and applies the stored preferences.
    ///
    /// Idempotent: enabling an already-enabled store changes nothing.
    /// A stored dark theme is applied through the theme switcher, and
    /// the current path and time are recorded under `lastPage` and
    /// `lastVisit`.
    pub async fn enable(&self) -> Result<(), StorageError> {
        if self.enabled.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.apply_stored().await?;

        tracing::info!("Functional preferences enabled");
        Ok(())
    }

    /// Closes the gate. Stored preferences stay in place.
    pub fn disable(&self) {
        if self.enabled.swap(false, Ordering::SeqCst) {
            tracing::info!("Functional preferences disabled");
        }
    }

    /// Writes one preference.
    ///
    /// Returns `Ok(false)` without touching storage while disabled.
    /// The whole document is rewritten, so concurrent keys are kept.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: JsonValue,
    ) -> Result<bool, StorageError> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut prefs = self.load_map().await?;
        prefs.insert(key.into(), value);
        self.save_map(&prefs).await?;
        Ok(true)
    }

    /// Reads one preference.
    ///
    /// Returns `default` while disabled or when the key is absent. A
    /// stored JSON `null` counts as present.
    pub async fn get(&self, key: &str, default: JsonValue) -> Result<JsonValue, StorageError> {
        if !self.is_enabled() {
            return Ok(default);
        }

        let prefs = self.load_map().await?;
        Ok(prefs.get(key).cloned().unwrap_or(default))
    }

    /// Reads the whole preference document, empty when nothing usable
    /// is stored. Not gated; `set` and `get` are the consent boundary.
    pub async fn all(&self) -> Result<PreferencesMap, StorageError> {
        self.load_map().await
    }

    /// Removes the persisted document. Works regardless of the gate.
    pub async fn clear_data(&self) -> Result<(), StorageError> {
        self.store.remove(&self.storage_key).await?;
        tracing::info!("Stored preferences cleared");
        Ok(())
    }

    // ───────────────────────────────────────────────
    // Private helpers
    // ───────────────────────────────────────────────

    /// The enable-time pass over the stored document.
    async fn apply_stored(&self) -> Result<(), StorageError> {
        let prefs = self.load_map().await?;

        if let Some(value) = prefs.get(THEME_KEY) {
            if Theme::from_value(value).is_dark() {
                self.theme.set_dark_mode(true);
            }
        }

        if let Some(last) = prefs
            .get(LAST_PAGE_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
        {
            tracing::info!(path = last, "Last visited page restored");
        }

        self.set(LAST_PAGE_KEY, JsonValue::String(self.page.current_path()))
            .await?;
        let now = serde_json::to_value(Timestamp::now())
            .map_err(|e| StorageError::serialization(LAST_VISIT_KEY, e.to_string()))?;
        self.set(LAST_VISIT_KEY, now).await?;

        Ok(())
    }

    async fn load_map(&self) -> Result<PreferencesMap, StorageError> {
        let raw = self.store.get(&self.storage_key).await?;
        Ok(codec::decode_lenient(&self.storage_key, raw).unwrap_or_default())
    }

    async fn save_map(&self, prefs: &PreferencesMap) -> Result<(), StorageError> {
        let json = codec::encode(&self.storage_key, prefs)?;
        self.store.set(&self.storage_key, &json).await
    }
}
