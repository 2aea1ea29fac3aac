//! UpdateGoalProgressHandler - Command handler for recording goal progress.
//!
//! Reaching the target for the first time leaves a progress notification
//! for the member.

use tracing::{debug, info};

use crate::application::GymContext;
use crate::domain::fitness::{FitnessGoal, GoalStatus};
use crate::domain::foundation::{GoalId, MemberId};
use crate::domain::member::{GoalTracker, MemberError};
use crate::domain::notification::{Notification, NotificationInput, NotificationType};

/// Command to set a goal's current value.
#[derive(Debug, Clone)]
pub struct UpdateGoalProgressCommand {
    pub member_id: MemberId,
    pub goal_id: GoalId,
    pub current: f64,
}

#[derive(Debug, Clone)]
pub struct UpdateGoalProgressResult {
    pub goal: FitnessGoal,
    pub previous_status: GoalStatus,
    /// Present when this update completed the goal.
    pub completion_notification: Option<Notification>,
}

pub struct UpdateGoalProgressHandler {
    context: GymContext,
}

impl UpdateGoalProgressHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(
        &self,
        cmd: UpdateGoalProgressCommand,
    ) -> Result<UpdateGoalProgressResult, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let state = &mut *state;
        let before = state.clone();

        let previous_status = state
            .registry
            .find(cmd.member_id)?
            .goal(cmd.goal_id)
            .map(|g| g.status())
            .ok_or_else(|| MemberError::goal_not_found(cmd.member_id, cmd.goal_id))?;

        let goal = GoalTracker::new(&mut state.registry).update_progress(
            cmd.member_id,
            cmd.goal_id,
            cmd.current,
            now,
        )?;

        let completion_notification =
            if goal.is_completed() && previous_status != GoalStatus::Completed {
                debug!(goal_id = %goal.id(), "Goal completed");
                Some(state.notifications.create(
                    NotificationInput::new(
                        cmd.member_id,
                        NotificationType::Progress,
                        format!(
                            "Goal reached: {} ({} {}).",
                            goal.description(),
                            goal.current(),
                            goal.unit()
                        ),
                    ),
                    now,
                ))
            } else {
                None
            };

        self.context.commit(state, before).await?;

        info!(
            member_id = %cmd.member_id,
            goal_id = %goal.id(),
            status = goal.status().as_str(),
            "Goal progress updated"
        );
        Ok(UpdateGoalProgressResult {
            goal,
            previous_status,
            completion_notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::{date, test_gym, TestGym};
    use crate::domain::fitness::NewGoal;
    use crate::domain::member::MemberInput;

    async fn member_with_goal(gym: &TestGym, target: f64) -> (MemberId, GoalId) {
        let mut state = gym.context.state.lock().await;
        let now = gym.context.now();
        let member = state
            .registry
            .create(MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)), now)
            .unwrap();
        let goal = GoalTracker::new(&mut state.registry)
            .add_goal(member.id, NewGoal::new("Bench", target, "kg"), now)
            .unwrap();
        (member.id, goal.id())
    }

    #[tokio::test]
    async fn progress_statuses_follow_target() {
        let gym = test_gym();
        let (member_id, goal_id) = member_with_goal(&gym, 100.0).await;
        let handler = UpdateGoalProgressHandler::new(gym.context.clone());

        for (value, expected) in [
            (0.0, GoalStatus::InProgress),
            (99.0, GoalStatus::InProgress),
            (100.0, GoalStatus::Completed),
            (110.0, GoalStatus::Completed),
        ] {
            let result = handler
                .handle(UpdateGoalProgressCommand { member_id, goal_id, current: value })
                .await
                .unwrap();
            assert_eq!(result.goal.status(), expected, "value {value}");
        }
    }

    #[tokio::test]
    async fn completion_notifies_once() {
        let gym = test_gym();
        let (member_id, goal_id) = member_with_goal(&gym, 10.0).await;
        let handler = UpdateGoalProgressHandler::new(gym.context.clone());

        let first = handler
            .handle(UpdateGoalProgressCommand { member_id, goal_id, current: 10.0 })
            .await
            .unwrap();
        let notification = first.completion_notification.unwrap();
        assert_eq!(notification.kind(), NotificationType::Progress);

        let second = handler
            .handle(UpdateGoalProgressCommand { member_id, goal_id, current: 12.0 })
            .await
            .unwrap();
        assert!(second.completion_notification.is_none());
        assert_eq!(second.previous_status, GoalStatus::Completed);
    }

    #[tokio::test]
    async fn unknown_goal_is_not_found() {
        let gym = test_gym();
        let (member_id, _) = member_with_goal(&gym, 10.0).await;

        let err = UpdateGoalProgressHandler::new(gym.context.clone())
            .handle(UpdateGoalProgressCommand {
                member_id,
                goal_id: GoalId::new(),
                current: 1.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MemberError::GoalNotFound { .. }));
    }
}
