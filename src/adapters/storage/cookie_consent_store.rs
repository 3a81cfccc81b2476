//! Cookie-backed Consent Store
//!
//! Persists the consent decision as JSON in a single named cookie,
//! rewritten with a fresh expiry on every save. An unreadable cookie
//! loads as no decision, which sends the visitor back to the banner
//! instead of failing the page.

use std::sync::Arc;

use crate::domain::consent::ConsentRecord;
use crate::ports::{codec, ConsentStore, CookieAttributes, CookieJar, StorageError};

/// Consent store backed by a named cookie.
pub struct CookieConsentStore {
    jar: Arc<dyn CookieJar>,
    cookie_name: String,
    expiry_days: i64,
}

impl CookieConsentStore {
    /// Create a store writing to `cookie_name` with the given lifetime.
    pub fn new(jar: Arc<dyn CookieJar>, cookie_name: impl Into<String>, expiry_days: i64) -> Self {
        Self {
            jar,
            cookie_name: cookie_name.into(),
            expiry_days,
        }
    }

    /// The cookie this store reads and writes.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

#[async_trait::async_trait]
impl ConsentStore for CookieConsentStore {
    async fn load(&self) -> Result<Option<ConsentRecord>, StorageError> {
        let raw = self.jar.get(&self.cookie_name).await?;
        Ok(codec::decode_lenient(&self.cookie_name, raw))
    }

    async fn save(&self, record: &ConsentRecord) -> Result<(), StorageError> {
        let json = codec::encode(&self.cookie_name, record)?;
        self.jar
            .set(
                &self.cookie_name,
                &json,
                CookieAttributes::expires_in_days(self.expiry_days),
            )
            .await
    }
}
