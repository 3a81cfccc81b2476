//! CookieJar port - Interface for named cookie access.
//!
//! Encapsulates the expiry, path, and SameSite plumbing so the rest of
//! the crate neither builds nor parses cookie strings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

use super::StorageError;

/// SameSite attribute for a stored cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        write!(f, "{}", s)
    }
}

/// Attributes applied when a cookie is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    /// When the cookie stops being readable.
    pub expires_at: Timestamp,

    /// Path scope; "/" makes the cookie site-wide.
    pub path: String,

    /// Cross-site sending policy.
    pub same_site: SameSite,
}

impl CookieAttributes {
    /// Site-wide cookie expiring the given number of days from now,
    /// sent on same-site navigation only.
    pub fn expires_in_days(days: i64) -> Self {
        Self::expires_at(Timestamp::now().add_days(days))
    }

    /// Site-wide `SameSite=Lax` cookie with an explicit expiry.
    pub fn expires_at(expires_at: Timestamp) -> Self {
        Self {
            expires_at,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        }
    }
}

/// Port for named cookie access.
///
/// Implementations must ensure:
/// - `get` of an expired cookie returns `Ok(None)`, same as never set
/// - `set` replaces both value and attributes
/// - `remove` of an absent cookie succeeds silently
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Read a cookie's value. Expired or absent cookies read as `None`.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Write a cookie with the given attributes.
    async fn set(
        &self,
        name: &str,
        value: &str,
        attributes: CookieAttributes,
    ) -> Result<(), StorageError>;

    /// Delete a cookie. Absent cookies are not an error.
    async fn remove(&self, name: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CookieJar) {}

    #[test]
    fn expires_in_days_builds_site_wide_lax_cookie() {
        let attrs = CookieAttributes::expires_in_days(365);
        assert_eq!(attrs.path, "/");
        assert_eq!(attrs.same_site, SameSite::Lax);
        assert!(attrs.expires_at.is_after(&Timestamp::now().add_days(364)));
    }

    #[test]
    fn expires_at_preserves_explicit_expiry() {
        let expiry = Timestamp::now().add_days(7);
        let attrs = CookieAttributes::expires_at(expiry);
        assert_eq!(attrs.expires_at, expiry);
    }

    #[test]
    fn same_site_displays_attribute_values() {
        assert_eq!(format!("{}", SameSite::Lax), "Lax");
        assert_eq!(format!("{}", SameSite::Strict), "Strict");
        assert_eq!(format!("{}", SameSite::None), "None");
    }
}
