//! In-Memory Snapshot Repository
//!
//! Keeps the last saved snapshot in memory. Useful for testing and for
//! running without a data directory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{GymSnapshot, GymSnapshotRepository, SnapshotError};

/// In-memory storage for the gym snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    snapshot: Arc<RwLock<Option<GymSnapshot>>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with a snapshot
    pub fn with_snapshot(snapshot: GymSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(snapshot))),
            saves: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of successful saves (useful for tests)
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }

    /// Last saved snapshot without going through the port
    pub async fn current(&self) -> Option<GymSnapshot> {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl GymSnapshotRepository for InMemorySnapshotRepository {
    async fn load(&self) -> Result<Option<GymSnapshot>, SnapshotError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &GymSnapshot) -> Result<(), SnapshotError> {
        *self.snapshot.write().await = Some(snapshot.clone());
        *self.saves.write().await += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_is_none_until_saved() {
        let repo = InMemorySnapshotRepository::new();
        assert!(repo.load().await.unwrap().is_none());

        repo.save(&GymSnapshot::default()).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(GymSnapshot::default()));
        assert_eq!(repo.save_count().await, 1);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemorySnapshotRepository::new();
        let other = repo.clone();
        repo.save(&GymSnapshot::default()).await.unwrap();
        assert!(other.current().await.is_some());
    }
}
