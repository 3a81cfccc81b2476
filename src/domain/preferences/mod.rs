//! Preferences domain module.
//!
//! Visitor preferences are a flat key-value document. Most keys are
//! free-form and owned by whoever sets them; the few the subsystem
//! itself reads and writes are named here.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Stored preference document: arbitrary keys, JSON values.
pub type PreferencesMap = BTreeMap<String, JsonValue>;

/// Key holding the visitor's theme choice.
pub const THEME_KEY: &str = "theme";

/// Key holding the last page the visitor was on. Written on enable.
pub const LAST_PAGE_KEY: &str = "lastPage";

/// Key holding the visitor's last visit time. Written on enable.
pub const LAST_VISIT_KEY: &str = "lastVisit";

/// Visual theme derived from the stored preference.
///
/// Only "dark" is recognized; any other stored value, wrong type
/// included, reads as the default light theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interprets a stored preference value.
    pub fn from_value(value: &JsonValue) -> Self {
        match value.as_str() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Returns true for the dark theme.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        write!(f, "{}", s)
    }
}
