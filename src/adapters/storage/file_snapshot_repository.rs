//! File-based Snapshot Repository
//!
//! Stores the gym snapshot as a single YAML (or JSON) file. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::ports::{GymSnapshot, GymSnapshotRepository, SnapshotError, SNAPSHOT_VERSION};

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Yaml,
    Json,
}

impl SnapshotFormat {
    /// `.json` means JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }

    fn encode(&self, snapshot: &GymSnapshot) -> Result<String, SnapshotError> {
        match self {
            SnapshotFormat::Yaml => serde_yaml::to_string(snapshot)
                .map_err(|e| SnapshotError::SerializationFailed(e.to_string())),
            SnapshotFormat::Json => serde_json::to_string_pretty(snapshot)
                .map_err(|e| SnapshotError::SerializationFailed(e.to_string())),
        }
    }

    fn decode(&self, raw: &str) -> Result<GymSnapshot, SnapshotError> {
        match self {
            SnapshotFormat::Yaml => serde_yaml::from_str(raw)
                .map_err(|e| SnapshotError::DeserializationFailed(e.to_string())),
            SnapshotFormat::Json => serde_json::from_str(raw)
                .map_err(|e| SnapshotError::DeserializationFailed(e.to_string())),
        }
    }
}

/// File-based storage for the gym snapshot
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    path: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotRepository {
    /// # Example
    /// ```ignore
    /// let repo = FileSnapshotRepository::new("./data/gym.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = SnapshotFormat::from_path(&path);
        Self { path, format }
    }

    /// Snapshot file `file_name` inside `data_dir`.
    pub fn in_dir<P: AsRef<Path>>(data_dir: P, file_name: &str) -> Self {
        Self::new(data_dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent(&self) -> Result<(), SnapshotError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| SnapshotError::IoError(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GymSnapshotRepository for FileSnapshotRepository {
    async fn load(&self) -> Result<Option<GymSnapshot>, SnapshotError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?
        {
            debug!(path = %self.path.display(), "No snapshot file yet");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;
        let snapshot = self.format.decode(&raw)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        info!(
            path = %self.path.display(),
            members = snapshot.members.len(),
            notifications = snapshot.notifications.len(),
            subscriptions = snapshot.subscriptions.len(),
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &GymSnapshot) -> Result<(), SnapshotError> {
        self.ensure_parent().await?;

        let encoded = self.format.encode(snapshot)?;
        let temp = self.temp_path();

        fs::write(&temp, encoded)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;

        debug!(path = %self.path.display(), "Snapshot saved");
        Ok(())
    }
}
