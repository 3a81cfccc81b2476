//! Headless Consent Surface
//!
//! Implements the surface port without rendering anything: every verb
//! just flips recorded state. The runtime uses it where no real UI
//! exists, and tests use its accessors to assert what a visitor would
//! be seeing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::consent::CookieCategory;
use crate::ports::{ConsentSurface, ThemeSwitcher};

/// Surface that records state instead of rendering.
///
/// A surface built with [`HeadlessSurface::absent`] reports not
/// present and renders no toggles, modeling a page without the banner
/// markup.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned, which only
/// happens after another thread panicked while holding the lock.
pub struct HeadlessSurface {
    present: bool,
    state: RwLock<SurfaceState>,
}

#[derive(Default)]
struct SurfaceState {
    banner_visible: bool,
    overlay_visible: bool,
    modal_open: bool,
    settings_button_visible: bool,
    toggles: HashMap<CookieCategory, bool>,
}

impl HeadlessSurface {
    /// Create a present surface with all configurable toggles
    /// rendered and unchecked.
    pub fn new() -> Self {
        let toggles = CookieCategory::CONFIGURABLE
            .iter()
            .map(|category| (*category, false))
            .collect();
        Self {
            present: true,
            state: RwLock::new(SurfaceState {
                toggles,
                ..SurfaceState::default()
            }),
        }
    }

    /// Create a present surface rendering only the given toggles,
    /// modeling markup with some checkboxes missing.
    pub fn with_toggles(categories: &[CookieCategory]) -> Self {
        let toggles = categories.iter().map(|category| (*category, false)).collect();
        Self {
            present: true,
            state: RwLock::new(SurfaceState {
                toggles,
                ..SurfaceState::default()
            }),
        }
    }

    /// Create a surface for a page without the banner markup.
    pub fn absent() -> Self {
        Self {
            present: false,
            state: RwLock::new(SurfaceState::default()),
        }
    }

    // ───────────────────────────────────────────────
    // Accessors (for assertions)
    // ───────────────────────────────────────────────

    /// Whether the banner is currently shown.
    pub fn banner_visible(&self) -> bool {
        self.read_state().banner_visible
    }

    /// Whether the page overlay is currently shown.
    pub fn overlay_visible(&self) -> bool {
        self.read_state().overlay_visible
    }

    /// Whether the settings modal is currently open.
    pub fn modal_open(&self) -> bool {
        self.read_state().modal_open
    }

    /// Whether the floating settings button is shown.
    pub fn settings_button_visible(&self) -> bool {
        self.read_state().settings_button_visible
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SurfaceState> {
        self.state
            .read()
            .expect("HeadlessSurface: state lock poisoned")
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SurfaceState> {
        self.state
            .write()
            .expect("HeadlessSurface: state write lock poisoned")
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsentSurface for HeadlessSurface {
    fn is_present(&self) -> bool {
        self.present
    }

    fn show_banner(&self) {
        self.write_state().banner_visible = true;
    }

    fn hide_banner(&self) {
        self.write_state().banner_visible = false;
    }

    fn show_overlay(&self) {
        self.write_state().overlay_visible = true;
    }

    fn hide_overlay(&self) {
        self.write_state().overlay_visible = false;
    }

    fn open_modal(&self) {
        self.write_state().modal_open = true;
    }

    fn close_modal(&self) {
        self.write_state().modal_open = false;
    }

    fn show_settings_button(&self) {
        self.write_state().settings_button_visible = true;
    }

    fn set_toggle(&self, category: CookieCategory, granted: bool) {
        // A toggle that is not rendered cannot be set
        if let Some(slot) = self.write_state().toggles.get_mut(&category) {
            *slot = granted;
        }
    }

    fn toggle_state(&self, category: CookieCategory) -> Option<bool> {
        self.read_state().toggles.get(&category).copied()
    }
}

/// Theme switcher that records the applied mode.
pub struct HeadlessThemeSwitcher {
    dark: AtomicBool,
}

impl HeadlessThemeSwitcher {
    pub fn new() -> Self {
        Self {
            dark: AtomicBool::new(false),
        }
    }

    /// Whether dark mode is currently applied.
    pub fn dark_mode(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }
}

impl Default for HeadlessThemeSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSwitcher for HeadlessThemeSwitcher {
    fn set_dark_mode(&self, enabled: bool) {
        self.dark.store(enabled, Ordering::SeqCst);
    }
}
