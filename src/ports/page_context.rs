//! PageContext port - Interface for reading the host page.
//!
//! What the analytics recorder knows about the page it is running on.
//! Reads are instantaneous in any real host, so this port is synchronous.

/// Port for reading the current page's identity.
pub trait PageContext: Send + Sync {
    /// Path of the current page (e.g., "/portfolio").
    fn current_path(&self) -> String;

    /// Document title of the current page.
    fn current_title(&self) -> String;

    /// Referrer the page was opened from, if the host reports one.
    ///
    /// `None` and an empty string both mean a direct visit.
    fn referrer(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PageContext) {}
}
