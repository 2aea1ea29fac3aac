//! Fitness goals and their derived status.
//!
//! A goal's status is never stored: it is computed from the current value,
//! the target, and whether any progress has been recorded yet. The only way
//! to move `current` is [`FitnessGoal::record_progress`], which the
//! `GoalTracker` calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GoalId, Timestamp, ValidationError};

/// Progress state of a fitness goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl GoalStatus {
    /// Derives the status of a goal.
    ///
    /// Reaching the target always completes the goal. Below target, a goal
    /// that has never had progress recorded is not started; once progress
    /// has been recorded it stays in progress, even if the value drops back
    /// to zero.
    pub fn derive(current: f64, target: f64, progress_recorded: bool) -> Self {
        if current >= target {
            GoalStatus::Completed
        } else if progress_recorded {
            GoalStatus::InProgress
        } else {
            GoalStatus::NotStarted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not-started",
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Completed => "completed",
        }
    }
}

/// Input for creating a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub description: String,
    pub target: f64,
    pub unit: String,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    pub fn new(description: impl Into<String>, target: f64, unit: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            target,
            unit: unit.into(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A measurable goal owned by a member.
///
/// # Invariants
///
/// - `description` is non-empty
/// - `target > 0`
/// - `current >= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessGoal {
    id: GoalId,
    description: String,
    target: f64,
    current: f64,
    unit: String,
    deadline: Option<NaiveDate>,
    progress_recorded: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl FitnessGoal {
    /// Validates the input and creates a goal with no progress.
    pub fn create(id: GoalId, input: NewGoal, now: Timestamp) -> Result<Self, ValidationError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        if !input.target.is_finite() || input.target <= 0.0 {
            return Err(ValidationError::out_of_range(
                "target",
                format!("must be greater than 0, got {}", input.target),
            ));
        }

        Ok(Self {
            id,
            description: description.to_string(),
            target: input.target,
            current: 0.0,
            unit: input.unit.trim().to_string(),
            deadline: input.deadline,
            progress_recorded: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Current status, derived on every call.
    pub fn status(&self) -> GoalStatus {
        GoalStatus::derive(self.current, self.target, self.progress_recorded)
    }

    pub fn is_completed(&self) -> bool {
        self.status() == GoalStatus::Completed
    }

    /// Percentage of the target reached, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        ((self.current / self.target) * 100.0).min(100.0)
    }

    /// True when the deadline has passed without the goal being completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.deadline {
            Some(deadline) => deadline < today && !self.is_completed(),
            None => false,
        }
    }

    /// Sets the current value, clamped to zero from below.
    ///
    /// There is no upper clamp; overshooting the target still completes it.
    /// Callers reject non-finite values first.
    pub(crate) fn record_progress(&mut self, value: f64, now: Timestamp) {
        // f64::max maps NaN to 0.0
        self.current = value.max(0.0);
        self.progress_recorded = true;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn goal(target: f64) -> FitnessGoal {
        FitnessGoal::create(GoalId::new(), NewGoal::new("Bench press", target, "kg"), Timestamp::now())
            .unwrap()
    }

    #[test]
    fn new_goal_starts_not_started_at_zero() {
        let g = goal(100.0);
        assert_eq!(g.current(), 0.0);
        assert_eq!(g.status(), GoalStatus::NotStarted);
        assert!(!g.is_completed());
    }

    #[test]
    fn create_rejects_blank_description() {
        let err = FitnessGoal::create(GoalId::new(), NewGoal::new("   ", 10.0, "kg"), Timestamp::now())
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("description"));
    }

    #[test]
    fn create_rejects_non_positive_target() {
        for target in [0.0, -5.0, f64::NAN] {
            let err = FitnessGoal::create(GoalId::new(), NewGoal::new("Run", target, "km"), Timestamp::now())
                .unwrap_err();
            assert_eq!(err.field(), "target");
        }
    }

    #[test]
    fn progress_at_representative_points() {
        let target = 50.0;
        let mut g = goal(target);

        g.record_progress(target - 1.0, Timestamp::now());
        assert_eq!(g.status(), GoalStatus::InProgress);

        g.record_progress(target, Timestamp::now());
        assert_eq!(g.status(), GoalStatus::Completed);

        g.record_progress(target + 10.0, Timestamp::now());
        assert_eq!(g.status(), GoalStatus::Completed);
        assert_eq!(g.current(), 60.0);

        g.record_progress(0.0, Timestamp::now());
        assert_eq!(g.status(), GoalStatus::InProgress);
    }

    #[test]
    fn negative_progress_is_clamped_to_zero() {
        let mut g = goal(10.0);
        g.record_progress(-3.0, Timestamp::now());
        assert_eq!(g.current(), 0.0);
    }

    #[test]
    fn progress_percent_caps_at_hundred() {
        let mut g = goal(200.0);
        g.record_progress(50.0, Timestamp::now());
        assert_eq!(g.progress_percent(), 25.0);
        g.record_progress(500.0, Timestamp::now());
        assert_eq!(g.progress_percent(), 100.0);
    }

    #[test]
    fn overdue_only_when_deadline_passed_and_incomplete() {
        let deadline = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut g = FitnessGoal::create(
            GoalId::new(),
            NewGoal::new("Lose weight", 5.0, "kg").with_deadline(deadline),
            Timestamp::now(),
        )
        .unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        assert!(!g.is_overdue(deadline));
        assert!(g.is_overdue(after));

        g.record_progress(5.0, Timestamp::now());
        assert!(!g.is_overdue(after));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&GoalStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    proptest! {
        #[test]
        fn status_follows_target_after_any_update(target in 0.5f64..1_000.0, x in -100.0f64..2_000.0) {
            let mut g = goal(target);
            g.record_progress(x, Timestamp::now());

            prop_assert!(g.current() >= 0.0);
            if x >= target {
                prop_assert_eq!(g.status(), GoalStatus::Completed);
            } else {
                prop_assert_eq!(g.status(), GoalStatus::InProgress);
            }
        }
    }
}
