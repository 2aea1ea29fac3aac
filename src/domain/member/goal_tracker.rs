//! GoalTracker - goal mutations scoped to a member.
//!
//! Borrows the registry mutably for the duration of the work, so goal
//! changes land directly on the authoritative member records.

use serde::{Deserialize, Serialize};

use crate::domain::fitness::{FitnessGoal, GoalStatus, NewGoal};
use crate::domain::foundation::{GoalId, MemberId, Timestamp, ValidationError};

use super::{MemberError, MemberRegistry};

/// Count of a member's goals per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl GoalSummary {
    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed
    }
}

/// Adds goals to members and records progress against them.
pub struct GoalTracker<'a> {
    registry: &'a mut MemberRegistry,
}

impl<'a> GoalTracker<'a> {
    pub fn new(registry: &'a mut MemberRegistry) -> Self {
        Self { registry }
    }

    /// Adds a goal with zero progress.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member does not exist
    /// - `Validation` for a blank description or a target that is not > 0
    pub fn add_goal(
        &mut self,
        member_id: MemberId,
        goal: NewGoal,
        now: Timestamp,
    ) -> Result<FitnessGoal, MemberError> {
        let member = self.registry.find_mut(member_id)?;
        let goal = FitnessGoal::create(GoalId::new(), goal, now)?;
        member.goals.push(goal.clone());
        member.touch(now);
        Ok(goal)
    }

    /// Sets a goal's current value and re-derives its status.
    ///
    /// Negative values are clamped to zero; values past the target are kept.
    ///
    /// # Errors
    ///
    /// - `Validation` if `new_current` is NaN or infinite
    /// - `MemberNotFound` / `GoalNotFound`
    pub fn update_progress(
        &mut self,
        member_id: MemberId,
        goal_id: GoalId,
        new_current: f64,
        now: Timestamp,
    ) -> Result<FitnessGoal, MemberError> {
        if !new_current.is_finite() {
            return Err(ValidationError::out_of_range(
                "new_current",
                format!("must be a finite number, got {}", new_current),
            )
            .into());
        }
        let member = self.registry.find_mut(member_id)?;
        let goal = member
            .goal_mut(goal_id)
            .ok_or_else(|| MemberError::goal_not_found(member_id, goal_id))?;
        goal.record_progress(new_current, now);
        let goal = goal.clone();
        member.touch(now);
        Ok(goal)
    }

    pub fn remove_goal(
        &mut self,
        member_id: MemberId,
        goal_id: GoalId,
        now: Timestamp,
    ) -> Result<FitnessGoal, MemberError> {
        let member = self.registry.find_mut(member_id)?;
        let index = member
            .goals
            .iter()
            .position(|g| g.id() == goal_id)
            .ok_or_else(|| MemberError::goal_not_found(member_id, goal_id))?;
        let goal = member.goals.remove(index);
        member.touch(now);
        Ok(goal)
    }

    pub fn goals(&self, member_id: MemberId) -> Result<&[FitnessGoal], MemberError> {
        Ok(&self.registry.find(member_id)?.goals)
    }

    pub fn summary(&self, member_id: MemberId) -> Result<GoalSummary, MemberError> {
        let mut summary = GoalSummary::default();
        for goal in self.goals(member_id)? {
            match goal.status() {
                GoalStatus::NotStarted => summary.not_started += 1,
                GoalStatus::InProgress => summary.in_progress += 1,
                GoalStatus::Completed => summary.completed += 1,
            }
        }
        Ok(summary)
    }
}
