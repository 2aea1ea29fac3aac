//! Shared gym state and the context every handler runs in.
//!
//! All core collections sit behind one async mutex. Every command holds it
//! from its first read to its final save, so the renewal dedupe check and
//! the notification it creates are atomic relative to member updates.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::member::MemberRegistry;
use crate::domain::notification::{NotificationScheduler, NotificationStore};
use crate::domain::subscription::SubscriptionLedger;
use crate::ports::{Clock, GymSnapshot, GymSnapshotRepository, SnapshotError};

/// The core collections.
#[derive(Debug, Clone, Default)]
pub struct GymState {
    pub registry: MemberRegistry,
    pub notifications: NotificationStore,
    pub subscriptions: SubscriptionLedger,
}

impl GymState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from a snapshot, rejecting duplicate ids or emails.
    pub fn from_snapshot(snapshot: GymSnapshot) -> Result<Self, SnapshotError> {
        let registry = MemberRegistry::restore(snapshot.members)
            .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        let notifications = NotificationStore::restore(snapshot.notifications)
            .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        let subscriptions = SubscriptionLedger::restore(snapshot.subscriptions)
            .map_err(|e| SnapshotError::Inconsistent(e.to_string()))?;
        Ok(Self {
            registry,
            notifications,
            subscriptions,
        })
    }

    pub fn to_snapshot(&self, saved_at: Timestamp) -> GymSnapshot {
        GymSnapshot {
            members: self.registry.members().to_vec(),
            notifications: self.notifications.all().to_vec(),
            subscriptions: self.subscriptions.all().to_vec(),
            saved_at: Some(saved_at),
            ..GymSnapshot::default()
        }
    }
}

pub type SharedGymState = Arc<Mutex<GymState>>;

/// Dependencies shared by all handlers.
#[derive(Clone)]
pub struct GymContext {
    pub state: SharedGymState,
    pub clock: Arc<dyn Clock>,
    pub repository: Arc<dyn GymSnapshotRepository>,
    pub scheduler: NotificationScheduler,
}

impl GymContext {
    pub fn new(
        state: GymState,
        clock: Arc<dyn Clock>,
        repository: Arc<dyn GymSnapshotRepository>,
        scheduler: NotificationScheduler,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            clock,
            repository,
            scheduler,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Saves the current state. Call while still holding the state lock.
    pub async fn persist(&self, state: &GymState) -> Result<(), DomainError> {
        let snapshot = state.to_snapshot(self.clock.now());
        self.repository.save(&snapshot).await.map_err(|e| {
            warn!(error = %e, "Failed to save gym snapshot");
            DomainError::from(e)
        })
    }

    /// Saves `state`, or puts `before` back if the save fails.
    ///
    /// Commands take `before` as a clone right after locking, so a failed
    /// save leaves memory exactly as it was and the command can be retried.
    pub async fn commit(&self, state: &mut GymState, before: GymState) -> Result<(), DomainError> {
        if let Err(err) = self.persist(state).await {
            *state = before;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::storage::InMemorySnapshotRepository;
    use crate::ports::GymSnapshot;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct TestGym {
        pub context: GymContext,
        pub clock: Arc<FixedClock>,
        pub repository: InMemorySnapshotRepository,
    }

    /// Empty gym on 2024-06-01 with the default 30-day horizon.
    pub fn test_gym() -> TestGym {
        let clock = Arc::new(FixedClock::on(date(2024, 6, 1)));
        let repository = InMemorySnapshotRepository::new();
        let context = GymContext::new(
            GymState::new(),
            clock.clone(),
            Arc::new(repository.clone()),
            NotificationScheduler::default(),
        );
        TestGym {
            context,
            clock,
            repository,
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Repository whose first `failures` saves fail, then stores in memory.
    pub struct FlakySnapshotRepository {
        failures_left: AtomicUsize,
        inner: InMemorySnapshotRepository,
    }

    #[async_trait]
    impl GymSnapshotRepository for FlakySnapshotRepository {
        async fn load(&self) -> Result<Option<GymSnapshot>, SnapshotError> {
            self.inner.load().await
        }

        async fn save(&self, snapshot: &GymSnapshot) -> Result<(), SnapshotError> {
            let failing = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(SnapshotError::IoError("disk full".to_string()));
            }
            self.inner.save(snapshot).await
        }
    }

    /// Like [`test_gym`], but the first `failures` saves fail. The returned
    /// repository only sees successful saves.
    pub fn flaky_gym(failures: usize) -> TestGym {
        let clock = Arc::new(FixedClock::on(date(2024, 6, 1)));
        let repository = InMemorySnapshotRepository::new();
        let flaky = FlakySnapshotRepository {
            failures_left: AtomicUsize::new(failures),
            inner: repository.clone(),
        };
        let context = GymContext::new(
            GymState::new(),
            clock.clone(),
            Arc::new(flaky),
            NotificationScheduler::default(),
        );
        TestGym {
            context,
            clock,
            repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MemberInput;
    use test_support::{date, test_gym};

    #[test]
    fn snapshot_round_trip_keeps_collections() {
        let mut state = GymState::new();
        let now = Timestamp::start_of(date(2024, 6, 1));
        state
            .registry
            .create(MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)), now)
            .unwrap();

        let snapshot = state.to_snapshot(now);
        assert_eq!(snapshot.saved_at, Some(now));

        let restored = GymState::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.registry.members(), state.registry.members());
    }

    #[test]
    fn duplicate_members_in_snapshot_are_inconsistent() {
        let mut state = GymState::new();
        let now = Timestamp::start_of(date(2024, 6, 1));
        let member = state
            .registry
            .create(MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)), now)
            .unwrap();

        let snapshot = GymSnapshot {
            members: vec![member.clone(), member],
            ..GymSnapshot::default()
        };
        assert!(matches!(
            GymState::from_snapshot(snapshot),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[tokio::test]
    async fn persist_writes_snapshot() {
        let gym = test_gym();
        let state = gym.context.state.lock().await;
        gym.context.persist(&state).await.unwrap();
        assert_eq!(gym.repository.save_count().await, 1);
    }

    #[tokio::test]
    async fn failed_commit_restores_previous_state() {
        let gym = test_support::flaky_gym(1);
        let now = gym.context.now();
        let mut state = gym.context.state.lock().await;

        let before = state.clone();
        state
            .registry
            .create(MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)), now)
            .unwrap();
        let err = gym.context.commit(&mut state, before).await.unwrap_err();

        assert_eq!(err.code, crate::domain::foundation::ErrorCode::StorageError);
        assert!(state.registry.is_empty());
        assert_eq!(gym.repository.save_count().await, 0);
    }
}
