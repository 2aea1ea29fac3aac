//! Fitness artifacts owned by a member.
//!
//! - `goal` - FitnessGoal with derived GoalStatus
//! - `workout` - WorkoutPlan and Exercise
//! - `photo` - ProgressPhoto and Measurements
//!
//! None of these outlive their member; they are only created and mutated
//! through the member registry and goal tracker.

mod goal;
mod photo;
mod workout;

pub use goal::{FitnessGoal, GoalStatus, NewGoal};
pub use photo::{Measurements, NewProgressPhoto, ProgressPhoto};
pub use workout::{Difficulty, Exercise, NewWorkoutPlan, WorkoutPlan};
