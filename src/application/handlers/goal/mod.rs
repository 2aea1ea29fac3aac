//! Fitness goal handlers.

mod add_goal;
mod manage_goals;
mod update_goal_progress;

pub use add_goal::{AddGoalCommand, AddGoalHandler};
pub use manage_goals::{GetGoalsHandler, GoalOverview, RemoveGoalCommand, RemoveGoalHandler};
pub use update_goal_progress::{
    UpdateGoalProgressCommand, UpdateGoalProgressHandler, UpdateGoalProgressResult,
};
