//! Workout plans and their exercises.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{Timestamp, ValidationError, WorkoutPlanId};

/// Exercise difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single exercise within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub rest_seconds: u32,
    pub difficulty: Difficulty,
}

impl Exercise {
    /// Creates an exercise, rejecting an empty name and zero sets or reps.
    pub fn new(
        name: impl Into<String>,
        sets: u32,
        reps: u32,
        rest_seconds: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ValidationError> {
        let exercise = Self {
            name: name.into().trim().to_string(),
            sets,
            reps,
            rest_seconds,
            difficulty,
        };
        exercise.validate()?;
        Ok(exercise)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("exercise.name"));
        }
        if self.sets == 0 {
            return Err(ValidationError::out_of_range("exercise.sets", "must be greater than 0"));
        }
        if self.reps == 0 {
            return Err(ValidationError::out_of_range("exercise.reps", "must be greater than 0"));
        }
        Ok(())
    }

    /// Estimated time under the bar plus rest, in seconds.
    ///
    /// Assumes three seconds per rep; rest is counted between sets only.
    pub fn estimated_seconds(&self) -> u32 {
        let work = self.sets * self.reps * 3;
        let rest = self.sets.saturating_sub(1) * self.rest_seconds;
        work + rest
    }
}

/// Input for creating a workout plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkoutPlan {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub target_duration_minutes: u32,
    pub muscle_groups: Vec<String>,
}

/// A named, ordered set of exercises owned by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: WorkoutPlanId,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub target_duration_minutes: u32,
    pub muscle_groups: BTreeSet<String>,
    pub created_at: Timestamp,
    pub last_completed_at: Option<Timestamp>,
}

impl WorkoutPlan {
    /// Validates the input and creates a plan that has never been completed.
    ///
    /// Muscle group names are trimmed and lower-cased; blanks are dropped and
    /// duplicates collapse into the set.
    pub fn create(
        id: WorkoutPlanId,
        input: NewWorkoutPlan,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        for exercise in &input.exercises {
            exercise.validate()?;
        }

        let muscle_groups = input
            .muscle_groups
            .iter()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();

        Ok(Self {
            id,
            name: name.to_string(),
            exercises: input.exercises,
            target_duration_minutes: input.target_duration_minutes,
            muscle_groups,
            created_at: now,
            last_completed_at: None,
        })
    }

    /// Records a completed session of this plan.
    pub fn mark_completed(&mut self, at: Timestamp) {
        self.last_completed_at = Some(at);
    }

    pub fn targets(&self, muscle_group: &str) -> bool {
        self.muscle_groups.contains(&muscle_group.trim().to_lowercase())
    }
}
