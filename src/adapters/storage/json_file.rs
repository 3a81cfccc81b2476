//! File-backed Storage Adapters
//!
//! Persist values as a single JSON document per store, so state
//! survives restarts the way origin-scoped browser storage survives
//! page loads. A malformed document is treated as empty rather than an
//! error; the next write replaces it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::{CookieAttributes, CookieJar, KeyValueStore, StorageError};

use super::in_memory::StoredCookie;

/// Reads a JSON map document, treating a missing or malformed file as
/// an empty map.
async fn read_map<V: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<HashMap<String, V>, StorageError> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(StorageError::Io(e.to_string())),
    };

    match serde_json::from_str(&text) {
        Ok(map) => Ok(map),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Storage file is malformed, starting from empty: {}",
                e
            );
            Ok(HashMap::new())
        }
    }
}

/// Writes a JSON map document, creating parent directories as needed.
async fn write_map<V: serde::Serialize>(
    path: &Path,
    map: &HashMap<String, V>,
) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
    }

    let json = serde_json::to_string_pretty(map)
        .map_err(|e| StorageError::Backend(format!("Failed to encode storage file: {}", e)))?;

    fs::write(path, json)
        .await
        .map_err(|e| StorageError::Io(e.to_string()))
}

/// File-backed key-value store.
///
/// All operations take an internal lock, so concurrent writers cannot
/// lose each other's keys to a read-modify-write race.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Create a store backed by the given JSON file.
    ///
    /// The file and its parent directories are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = JsonFileStore::new("./data/local-storage.json");
    /// ```
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let map: HashMap<String, String> = read_map(&self.file_path).await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map: HashMap<String, String> = read_map(&self.file_path).await?;
        map.insert(key.to_string(), value.to_string());
        write_map(&self.file_path, &map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map: HashMap<String, String> = read_map(&self.file_path).await?;
        if map.remove(key).is_some() {
            write_map(&self.file_path, &map).await?;
        }
        Ok(())
    }
}

/// File-backed cookie jar.
///
/// Stores each cookie with its attributes and honors expiry on read:
/// a cookie past its `expires_at` reads as absent.
#[derive(Debug, Clone)]
pub struct FileCookieJar {
    file_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileCookieJar {
    /// Create a jar backed by the given JSON file.
    ///
    /// # Example
    /// ```ignore
    /// let jar = FileCookieJar::new("./data/cookies.json");
    /// ```
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl CookieJar for FileCookieJar {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let map: HashMap<String, StoredCookie> = read_map(&self.file_path).await?;
        let now = Timestamp::now();
        Ok(map
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
        let _guard = self.lock.lock().await;
        let mut map: HashMap<String, StoredCookie> = read_map(&self.file_path).await?;
        map.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                attributes,
            },
        );
        write_map(&self.file_path, &map).await
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map: HashMap<String, StoredCookie> = read_map(&self.file_path).await?;
        if map.remove(name).is_some() {
            write_map(&self.file_path, &map).await?;
        }
        Ok(())
    }
}
