//! Goal removal and read-side queries.

use tracing::info;

use crate::application::GymContext;
use crate::domain::fitness::FitnessGoal;
use crate::domain::foundation::{GoalId, MemberId};
use crate::domain::member::{GoalSummary, GoalTracker, MemberError};

/// Command to drop a goal.
#[derive(Debug, Clone)]
pub struct RemoveGoalCommand {
    pub member_id: MemberId,
    pub goal_id: GoalId,
}

pub struct RemoveGoalHandler {
    context: GymContext,
}

impl RemoveGoalHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: RemoveGoalCommand) -> Result<FitnessGoal, MemberError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let goal = GoalTracker::new(&mut state.registry).remove_goal(cmd.member_id, cmd.goal_id, now)?;
        self.context.commit(&mut state, before).await?;

        info!(member_id = %cmd.member_id, goal_id = %goal.id(), "Goal removed");
        Ok(goal)
    }
}

/// A member's goals with per-status counts.
#[derive(Debug, Clone)]
pub struct GoalOverview {
    pub goals: Vec<FitnessGoal>,
    pub summary: GoalSummary,
}

pub struct GetGoalsHandler {
    context: GymContext,
}

impl GetGoalsHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, member_id: MemberId) -> Result<GoalOverview, MemberError> {
        let mut state = self.context.state.lock().await;
        let tracker = GoalTracker::new(&mut state.registry);
        Ok(GoalOverview {
            goals: tracker.goals(member_id)?.to_vec(),
            summary: tracker.summary(member_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::{date, test_gym};
    use crate::domain::fitness::NewGoal;
    use crate::domain::member::MemberInput;

    #[tokio::test]
    async fn remove_then_overview() {
        let gym = test_gym();
        let now = gym.context.now();
        let (member_id, keep, drop) = {
            let mut state = gym.context.state.lock().await;
            let member = state
                .registry
                .create(MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)), now)
                .unwrap();
            let mut tracker = GoalTracker::new(&mut state.registry);
            let keep = tracker.add_goal(member.id, NewGoal::new("Squat", 100.0, "kg"), now).unwrap();
            let drop = tracker.add_goal(member.id, NewGoal::new("Plank", 60.0, "s"), now).unwrap();
            tracker.update_progress(member.id, keep.id(), 100.0, now).unwrap();
            (member.id, keep.id(), drop.id())
        };

        RemoveGoalHandler::new(gym.context.clone())
            .handle(RemoveGoalCommand { member_id, goal_id: drop })
            .await
            .unwrap();

        let overview = GetGoalsHandler::new(gym.context.clone()).handle(member_id).await.unwrap();
        assert_eq!(overview.goals.len(), 1);
        assert_eq!(overview.goals[0].id(), keep);
        assert_eq!(overview.summary.completed, 1);
        assert_eq!(overview.summary.total(), 1);
    }
}
