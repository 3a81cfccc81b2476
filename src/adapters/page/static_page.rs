//! Static Page Context
//!
//! A `PageContext` whose page identity is set by the caller rather
//! than read from a real navigation environment. `navigate_to` lets a
//! demo or test move the "visitor" across pages through a shared
//! handle.

use std::sync::RwLock;

use crate::ports::PageContext;

/// Page context with caller-controlled identity.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned, which only
/// happens after another thread panicked while holding the lock.
pub struct StaticPageContext {
    state: RwLock<PageState>,
}

struct PageState {
    path: String,
    title: String,
    referrer: Option<String>,
}

impl StaticPageContext {
    /// Create a context for the given page, reached directly.
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(PageState {
                path: path.into(),
                title: title.into(),
                referrer: None,
            }),
        }
    }

    /// Set the page the visitor arrived from.
    pub fn with_referrer(self, referrer: impl Into<String>) -> Self {
        self.state
            .write()
            .expect("StaticPageContext: state write lock poisoned")
            .referrer = Some(referrer.into());
        self
    }

    /// Move the context to another page.
    ///
    /// Later page loads then report the new path and title.
    pub fn navigate_to(&self, path: impl Into<String>, title: impl Into<String>) {
        let mut state = self
            .state
            .write()
            .expect("StaticPageContext: state write lock poisoned");
        state.path = path.into();
        state.title = title.into();
    }
}

impl PageContext for StaticPageContext {
    fn current_path(&self) -> String {
        self.state
            .read()
            .expect("StaticPageContext: state lock poisoned")
            .path
            .clone()
    }

    fn current_title(&self) -> String {
        self.state
            .read()
            .expect("StaticPageContext: state lock poisoned")
            .title
            .clone()
    }

    fn referrer(&self) -> Option<String> {
        self.state
            .read()
            .expect("StaticPageContext: state lock poisoned")
            .referrer
            .clone()
    }
}
