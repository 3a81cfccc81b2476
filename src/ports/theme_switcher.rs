//! ThemeSwitcher port - Interface for applying the visual theme.
//!
//! The preferences service applies the stored theme through this port
//! when it is enabled. A class toggle in any real host, so synchronous.

/// Port for switching the page's visual theme.
pub trait ThemeSwitcher: Send + Sync {
    /// Turns dark mode on or off.
    fn set_dark_mode(&self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ThemeSwitcher) {}
}
