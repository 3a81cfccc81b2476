//! Storage backend configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Storage backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which backend holds the persisted documents
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend's JSON documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Persistence backend choice
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Everything in memory; nothing survives the process
    #[default]
    Memory,
    /// JSON documents under `data_dir`
    File,
}

impl StorageConfig {
    /// Check if the file backend is selected
    pub fn is_file_backed(&self) -> bool {
        self.backend == StorageBackend::File
    }

    /// Path of a named document under the data directory
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_file_backed() && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_DATA_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    Path::new("./data").to_path_buf()
}
