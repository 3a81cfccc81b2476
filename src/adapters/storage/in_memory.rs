//! In-Memory Storage Adapters
//!
//! Keep values in process memory. The backing maps are shared across
//! clones, so a clone sees every write. Useful for testing and for the
//! tab-scoped store, whose contents are supposed to end with the
//! process anyway.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{CookieAttributes, CookieJar, KeyValueStore, StorageError};

/// In-memory key-value store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored values (useful for tests).
    pub async fn clear(&self) {
        self.values.write().await.clear();
    }

    /// Get the number of stored values.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Whether the store holds no values.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        values.remove(key);
        Ok(())
    }
}

/// A cookie as held by the in-memory and file-backed jars.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub(crate) struct StoredCookie {
    pub value: String,
    pub attributes: CookieAttributes,
}

impl StoredCookie {
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        self.attributes.expires_at.is_before(now)
    }
}

/// In-memory cookie jar.
///
/// Honors expiry on read: a cookie past its `expires_at` reads as
/// absent, exactly as if it had never been set.
#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    cookies: Arc<RwLock<HashMap<String, StoredCookie>>>,
}

impl MemoryCookieJar {
    /// Create a new empty jar.
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of stored cookies, expired ones included.
    pub async fn len(&self) -> usize {
        self.cookies.read().await.len()
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let cookies = self.cookies.read().await;
        let now = Timestamp::now();
        Ok(cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired(&now))
            .map(|cookie| cookie.value.clone()))
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        attributes: CookieAttributes,
    ) -> Result<(), StorageError> {
        let mut cookies = self.cookies.write().await;
        cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                attributes,
            },
        );
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let mut cookies = self.cookies.write().await;
        cookies.remove(name);
        Ok(())
    }
}
