//! Consent record value objects.
//!
//! A `ConsentRecord` is the persisted outcome of a visitor's cookie
//! decision. It is written whole on every decision and never merged:
//! the latest decision fully replaces whatever was stored before.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Cookie categories a visitor can grant or refuse.
///
/// `Necessary` exists so the category can be named in reporting and
/// `grants()` checks, but it is not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookieCategory {
    Necessary,
    Functional,
    Analytics,
    Marketing,
}

impl CookieCategory {
    /// The categories a visitor can actually toggle.
    pub const CONFIGURABLE: [CookieCategory; 3] = [
        CookieCategory::Functional,
        CookieCategory::Analytics,
        CookieCategory::Marketing,
    ];
}

impl fmt::Display for CookieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CookieCategory::Necessary => "necessary",
            CookieCategory::Functional => "functional",
            CookieCategory::Analytics => "analytics",
            CookieCategory::Marketing => "marketing",
        };
        write!(f, "{}", s)
    }
}

/// The three user-configurable category choices read from the settings
/// modal. Missing toggles default to refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentSelection {
    pub functional: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentSelection {
    /// Selection with every configurable category granted.
    pub fn all_granted() -> Self {
        Self {
            functional: true,
            analytics: true,
            marketing: true,
        }
    }

    /// Selection with every configurable category refused.
    pub fn all_refused() -> Self {
        Self::default()
    }
}

/// Persisted consent decision.
///
/// # Invariants
///
/// - `necessary` is always `true`; decode normalizes any stored value
/// - `timestamp` records when the decision was made
/// - Records are replaced whole, never partially updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Required for site operation; cannot be refused.
    #[serde(default = "granted", deserialize_with = "always_granted")]
    necessary: bool,

    /// Preference cookies (theme, language, remembered choices).
    functional: bool,

    /// Local usage measurement.
    analytics: bool,

    /// Advertising and campaign cookies.
    marketing: bool,

    /// When the visitor made this decision.
    timestamp: Timestamp,
}

fn granted() -> bool {
    true
}

/// Necessary cookies cannot be refused; whatever was stored reads as granted.
fn always_granted<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let _ = bool::deserialize(deserializer)?;
    Ok(granted())
}

impl ConsentRecord {
    /// Record granting every category.
    pub fn accept_all(decided_at: Timestamp) -> Self {
        Self::from_selection(ConsentSelection::all_granted(), decided_at)
    }

    /// Record refusing every configurable category.
    ///
    /// `necessary` stays granted; it is not a choice.
    pub fn reject_all(decided_at: Timestamp) -> Self {
        Self::from_selection(ConsentSelection::all_refused(), decided_at)
    }

    /// Record built from the modal selection.
    pub fn from_selection(selection: ConsentSelection, decided_at: Timestamp) -> Self {
        Self {
            necessary: true,
            functional: selection.functional,
            analytics: selection.analytics,
            marketing: selection.marketing,
            timestamp: decided_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns whether the given category is granted.
    pub fn grants(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Necessary => self.necessary,
            CookieCategory::Functional => self.functional,
            CookieCategory::Analytics => self.analytics,
            CookieCategory::Marketing => self.marketing,
        }
    }

    /// Always true.
    pub fn necessary(&self) -> bool {
        self.necessary
    }

    /// Returns whether functional cookies are granted.
    pub fn functional(&self) -> bool {
        self.functional
    }

    /// Returns whether analytics cookies are granted.
    pub fn analytics(&self) -> bool {
        self.analytics
    }

    /// Returns whether marketing cookies are granted.
    pub fn marketing(&self) -> bool {
        self.marketing
    }

    /// Returns when the decision was made.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns the configurable part of this record, for pre-populating
    /// the settings modal toggles.
    pub fn selection(&self) -> ConsentSelection {
        ConsentSelection {
            functional: self.functional,
            analytics: self.analytics,
            marketing: self.marketing,
        }
    }
}
