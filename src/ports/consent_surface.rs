//! ConsentSurface port - Interface to the consent UI anchors.
//!
//! The banner, shared overlay, settings modal, floating settings button,
//! and the three category toggles are structural anchors provided by the
//! host page. The controller drives them through this port and never
//! touches presentation directly.
//!
//! Surface operations are instantaneous in any real host (class toggles,
//! attribute reads), so this port is synchronous.

use crate::domain::consent::CookieCategory;

/// Port for driving the consent banner, modal, and toggles.
///
/// Implementations must ensure:
/// - All operations are safe to repeat (showing a shown banner is a no-op)
/// - `toggle_state` returns `None` for a toggle the page does not render
pub trait ConsentSurface: Send + Sync {
    /// Returns true when the page renders a consent banner at all.
    ///
    /// Pages without one (intentionally or through markup drift) get the
    /// whole consent UI disabled rather than a crash.
    fn is_present(&self) -> bool;

    /// Makes the banner visible.
    fn show_banner(&self);

    /// Hides the banner.
    fn hide_banner(&self);

    /// Shows the page-dimming overlay shared by banner and modal.
    fn show_overlay(&self);

    /// Hides the page-dimming overlay.
    fn hide_overlay(&self);

    /// Opens the settings modal.
    fn open_modal(&self);

    /// Closes the settings modal.
    fn close_modal(&self);

    /// Shows the floating settings button for revisiting the decision.
    fn show_settings_button(&self);

    /// Sets a category toggle to the given state, if it is rendered.
    fn set_toggle(&self, category: CookieCategory, granted: bool);

    /// Reads a category toggle. `None` when the page omits that toggle.
    fn toggle_state(&self, category: CookieCategory) -> Option<bool>;
}
