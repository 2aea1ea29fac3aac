//! Snapshot storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the gym snapshot lives
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives a restart
    #[default]
    Memory,
    /// Single YAML or JSON file under `data_dir`
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the snapshot file (file backend only)
    pub data_dir: Option<PathBuf>,

    /// Snapshot file name; a `.json` extension selects JSON
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl StorageConfig {
    /// Full snapshot path, when a data directory is configured.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(&self.file_name))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.is_none() {
            return Err(ValidationError::MissingRequired("storage.data_dir"));
        }
        if self.file_name.trim().is_empty() {
            return Err(ValidationError::EmptyFileName);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: None,
            file_name: default_file_name(),
        }
    }
}

fn default_file_name() -> String {
    "gym.yaml".to_string()
}
