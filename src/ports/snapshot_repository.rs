//! Snapshot Repository Port - persistence for the whole gym state.
//!
//! The core works on in-memory collections. Persistence is a snapshot of
//! all of them, loaded once on startup and saved after each mutation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::member::Member;
use crate::domain::notification::Notification;
use crate::domain::subscription::Subscription;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything the desk holds, in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub saved_at: Option<Timestamp>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for GymSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            members: Vec::new(),
            notifications: Vec::new(),
            subscriptions: Vec::new(),
            saved_at: None,
        }
    }
}

impl GymSnapshot {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.notifications.is_empty() && self.subscriptions.is_empty()
    }
}

/// Errors that can occur while loading or saving snapshots
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Snapshot is inconsistent: {0}")]
    Inconsistent(String),
}

impl From<SnapshotError> for DomainError {
    fn from(err: SnapshotError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for persisting the gym snapshot
#[async_trait]
pub trait GymSnapshotRepository: Send + Sync {
    /// Load the last saved snapshot, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<GymSnapshot>, SnapshotError>;

    /// Replace the stored snapshot.
    async fn save(&self, snapshot: &GymSnapshot) -> Result<(), SnapshotError>;
}
