//! AddGoalHandler - Command handler for adding fitness goals.

use tracing::info;

use crate::application::GymContext;
use crate::domain::fitness::{FitnessGoal, NewGoal};
use crate::domain::foundation::MemberId;
use crate::domain::member::{GoalTracker, MemberError};

/// Command to add a goal to a member.
#[derive(Debug, Clone)]
pub struct AddGoalCommand {
    pub member_id: MemberId,
    pub goal: NewGoal,
}

pub struct AddGoalHandler {
    context: GymContext,
}

impl AddGoalHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: AddGoalCommand) -> Result<FitnessGoal, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let goal = GoalTracker::new(&mut state.registry).add_goal(cmd.member_id, cmd.goal, now)?;
        self.context.commit(&mut state, before).await?;

        info!(member_id = %cmd.member_id, goal_id = %goal.id(), "Goal added");
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::test_gym;
    use crate::domain::fitness::GoalStatus;
    use crate::domain::member::MemberInput;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn new_goal_is_not_started() {
        let gym = test_gym();
        let member_id = {
            let mut state = gym.context.state.lock().await;
            state
                .registry
                .create(
                    MemberInput::new("A", "B", "a@b.co", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                    gym.context.now(),
                )
                .unwrap()
                .id
        };

        let goal = AddGoalHandler::new(gym.context.clone())
            .handle(AddGoalCommand {
                member_id,
                goal: NewGoal::new("Run 10km", 10.0, "km"),
            })
            .await
            .unwrap();

        assert_eq!(goal.status(), GoalStatus::NotStarted);
        assert_eq!(gym.repository.save_count().await, 1);
    }

    #[tokio::test]
    async fn zero_target_is_a_validation_error() {
        let gym = test_gym();
        let member_id = {
            let mut state = gym.context.state.lock().await;
            state
                .registry
                .create(
                    MemberInput::new("A", "B", "a@b.co", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                    gym.context.now(),
                )
                .unwrap()
                .id
        };

        let err = AddGoalHandler::new(gym.context.clone())
            .handle(AddGoalCommand {
                member_id,
                goal: NewGoal::new("Nothing", 0.0, "km"),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
