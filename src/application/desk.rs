//! GymDesk - the assembled application.
//!
//! Wires configuration, a clock and a snapshot repository into one handle
//! exposing every command and query.

use std::sync::Arc;

use tracing::info;

use crate::adapters::clock::SystemClock;
use crate::adapters::scheduler::{RenewalTimer, RenewalTimerConfig, RenewalTimerHandle};
use crate::adapters::storage::{FileSnapshotRepository, InMemorySnapshotRepository};
use crate::config::{AppConfig, StorageBackend, ValidationError as ConfigValidationError};
use crate::domain::fitness::{FitnessGoal, NewGoal, ProgressPhoto, WorkoutPlan};
use crate::domain::foundation::{DomainError, GoalId, MemberId, NotificationId};
use crate::domain::member::{Member, MemberError, MemberFilter, MemberInput, MemberPatch};
use crate::domain::notification::{Notification, NotificationError, NotificationInput, NotificationScheduler};
use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionInput};
use crate::ports::{Clock, GymSnapshot, GymSnapshotRepository};

use super::handlers::goal::{
    AddGoalCommand, AddGoalHandler, GetGoalsHandler, GoalOverview, RemoveGoalCommand,
    RemoveGoalHandler, UpdateGoalProgressCommand, UpdateGoalProgressHandler,
    UpdateGoalProgressResult,
};
use super::handlers::member::{
    CreateMemberCommand, CreateMemberHandler, CreateMemberResult, DeleteMemberCommand,
    DeleteMemberHandler, DeleteMemberResult, GetMemberHandler, GetMemberQuery,
    ListMembersHandler, ListMembersQuery, ProgressPhotoCommand, ProgressPhotoHandler,
    RecordVisitCommand, RecordVisitHandler, UpdateMemberCommand, UpdateMemberHandler,
    UpdateMemberResult, WorkoutPlanCommand, WorkoutPlanHandler,
};
use super::handlers::notification::{
    ClearNotificationsHandler, CreateNotificationCommand, CreateNotificationHandler, Inbox,
    ListNotificationsHandler, MarkNotificationReadCommand, MarkNotificationReadHandler,
    RenewalCheckResult, RunRenewalCheckHandler,
};
use super::handlers::subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, ListSubscriptionsHandler,
    ManageSubscriptionCommand, ManageSubscriptionHandler,
};
use super::{GymContext, GymState};

/// The gym front desk.
#[derive(Clone)]
pub struct GymDesk {
    context: GymContext,
    timer_config: RenewalTimerConfig,
}

impl GymDesk {
    /// Validates the config, loads the last snapshot (if any) and assembles
    /// the desk.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the config is invalid
    /// - `StorageError` if the snapshot cannot be read or is inconsistent
    pub async fn open(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        repository: Arc<dyn GymSnapshotRepository>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let state = match repository.load().await? {
            Some(snapshot) => GymState::from_snapshot(snapshot)?,
            None => GymState::new(),
        };
        info!(
            members = state.registry.len(),
            notifications = state.notifications.len(),
            subscriptions = state.subscriptions.len(),
            horizon_days = config.scheduler.horizon_days,
            "Gym desk opened"
        );

        let scheduler = NotificationScheduler::with_horizon(config.scheduler.horizon_days);
        let context = GymContext::new(state, clock, repository, scheduler);
        let timer_config = RenewalTimerConfig::default()
            .with_interval(config.scheduler.interval())
            .with_run_on_startup(config.scheduler.run_on_startup);

        Ok(Self {
            context,
            timer_config,
        })
    }

    /// Opens with the configured storage backend and the system clock.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let repository: Arc<dyn GymSnapshotRepository> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemorySnapshotRepository::new()),
            StorageBackend::File => {
                let path = config.storage.snapshot_path().ok_or_else(|| {
                    DomainError::from(ConfigValidationError::MissingRequired("storage.data_dir"))
                })?;
                Arc::new(FileSnapshotRepository::new(path))
            }
        };
        Self::open(config, Arc::new(SystemClock), repository).await
    }

    pub fn context(&self) -> &GymContext {
        &self.context
    }

    /// Current state as a snapshot, without saving it.
    pub async fn snapshot(&self) -> GymSnapshot {
        let state = self.context.state.lock().await;
        state.to_snapshot(self.context.now())
    }

    /// Starts the recurring renewal check on the current runtime.
    pub fn start_renewal_timer(&self) -> RenewalTimerHandle {
        RenewalTimer::new(
            RunRenewalCheckHandler::new(self.context.clone()),
            self.timer_config.clone(),
        )
        .spawn()
    }

    // Members

    pub async fn create_member(&self, input: MemberInput) -> Result<CreateMemberResult, MemberError> {
        CreateMemberHandler::new(self.context.clone())
            .handle(CreateMemberCommand { input })
            .await
    }

    pub async fn update_member(
        &self,
        member_id: MemberId,
        patch: MemberPatch,
    ) -> Result<UpdateMemberResult, MemberError> {
        UpdateMemberHandler::new(self.context.clone())
            .handle(UpdateMemberCommand { member_id, patch })
            .await
    }

    pub async fn delete_member(&self, member_id: MemberId) -> Result<DeleteMemberResult, MemberError> {
        DeleteMemberHandler::new(self.context.clone())
            .handle(DeleteMemberCommand { member_id })
            .await
    }

    pub async fn member(&self, member_id: MemberId) -> Result<Member, MemberError> {
        GetMemberHandler::new(self.context.clone())
            .handle(GetMemberQuery { member_id })
            .await
    }

    pub async fn list_members(&self, filter: MemberFilter) -> Vec<Member> {
        ListMembersHandler::new(self.context.clone())
            .handle(ListMembersQuery { filter })
            .await
    }

    pub async fn workout_plan(&self, cmd: WorkoutPlanCommand) -> Result<WorkoutPlan, MemberError> {
        WorkoutPlanHandler::new(self.context.clone()).handle(cmd).await
    }

    pub async fn progress_photo(&self, cmd: ProgressPhotoCommand) -> Result<ProgressPhoto, MemberError> {
        ProgressPhotoHandler::new(self.context.clone()).handle(cmd).await
    }

    pub async fn record_visit(&self, member_id: MemberId) -> Result<Member, MemberError> {
        RecordVisitHandler::new(self.context.clone())
            .handle(RecordVisitCommand { member_id })
            .await
    }

    // Goals

    pub async fn add_goal(&self, member_id: MemberId, goal: NewGoal) -> Result<FitnessGoal, MemberError> {
        AddGoalHandler::new(self.context.clone())
            .handle(AddGoalCommand { member_id, goal })
            .await
    }

    pub async fn update_goal_progress(
        &self,
        member_id: MemberId,
        goal_id: GoalId,
        current: f64,
    ) -> Result<UpdateGoalProgressResult, MemberError> {
        UpdateGoalProgressHandler::new(self.context.clone())
            .handle(UpdateGoalProgressCommand {
                member_id,
                goal_id,
                current,
            })
            .await
    }

    pub async fn remove_goal(&self, member_id: MemberId, goal_id: GoalId) -> Result<FitnessGoal, MemberError> {
        RemoveGoalHandler::new(self.context.clone())
            .handle(RemoveGoalCommand { member_id, goal_id })
            .await
    }

    pub async fn goals(&self, member_id: MemberId) -> Result<GoalOverview, MemberError> {
        GetGoalsHandler::new(self.context.clone()).handle(member_id).await
    }

    // Notifications

    pub async fn notifications(&self, member_id: MemberId) -> Inbox {
        ListNotificationsHandler::new(self.context.clone())
            .handle(member_id)
            .await
    }

    pub async fn mark_notification_read(&self, notification_id: NotificationId) -> Result<(), NotificationError> {
        MarkNotificationReadHandler::new(self.context.clone())
            .handle(MarkNotificationReadCommand { notification_id })
            .await
    }

    pub async fn clear_notifications(&self) -> Result<usize, NotificationError> {
        ClearNotificationsHandler::new(self.context.clone()).handle().await
    }

    pub async fn create_notification(&self, input: NotificationInput) -> Result<Notification, NotificationError> {
        CreateNotificationHandler::new(self.context.clone())
            .handle(CreateNotificationCommand { input })
            .await
    }

    pub async fn run_renewal_check(&self) -> Result<RenewalCheckResult, DomainError> {
        RunRenewalCheckHandler::new(self.context.clone()).handle().await
    }

    // Subscriptions

    pub async fn create_subscription(&self, input: SubscriptionInput) -> Result<Subscription, SubscriptionError> {
        CreateSubscriptionHandler::new(self.context.clone())
            .handle(CreateSubscriptionCommand { input })
            .await
    }

    pub async fn manage_subscription(&self, cmd: ManageSubscriptionCommand) -> Result<Subscription, SubscriptionError> {
        ManageSubscriptionHandler::new(self.context.clone()).handle(cmd).await
    }

    pub async fn subscriptions(&self, member_id: MemberId) -> Vec<Subscription> {
        ListSubscriptionsHandler::new(self.context.clone())
            .handle(member_id)
            .await
    }
}
