//! Member aggregate entity.
//!
//! A Member is the root owner of goals, workout plans, and progress photos.
//! Those children are only reachable through their member and are removed
//! with it.
//!
//! # Design Decisions
//!
//! - **Dates, not instants**: join, visit and expiry are calendar dates;
//!   only audit fields (`created_at`, `updated_at`) are timestamps
//! - **Validate then commit**: updates are applied to a copy and only
//!   swapped in when every supplied field passes

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::fitness::{FitnessGoal, ProgressPhoto, WorkoutPlan};
use crate::domain::foundation::{
    GoalId, MemberId, PhotoId, Timestamp, ValidationError, WorkoutPlanId,
};

use super::input::{validate_email, validate_name};
use super::{MemberInput, MemberPatch, MemberStatus, MembershipType};

/// Member aggregate.
///
/// # Invariants
///
/// - `id` is unique and never reused
/// - `email` is unique across the registry (case-insensitive)
/// - `membership_expiry >= join_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub membership_type: MembershipType,
    pub status: MemberStatus,
    pub join_date: NaiveDate,
    pub last_visit: Option<NaiveDate>,
    pub membership_expiry: NaiveDate,
    pub goals: Vec<FitnessGoal>,
    pub workout_plans: Vec<WorkoutPlan>,
    pub progress_photos: Vec<ProgressPhoto>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Expiry used when none is supplied: one calendar year after joining.
///
/// A member joining on Feb 29 expires on Feb 28 of the following year.
pub fn default_expiry(join_date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    join_date
        .checked_add_months(Months::new(12))
        .ok_or_else(|| ValidationError::out_of_range("join_date", "date is too far in the future"))
}

impl Member {
    /// Validates every field of `input` and builds an active member.
    ///
    /// Email uniqueness is the registry's concern and is not checked here.
    pub fn register(
        id: MemberId,
        input: MemberInput,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let first_name = validate_name("first_name", &input.first_name)?;
        let last_name = validate_name("last_name", &input.last_name)?;
        let email = validate_email(&input.email)?;
        input.membership_type.validate()?;
        validate_join_date(input.join_date, today)?;

        let membership_expiry = match input.membership_expiry {
            Some(expiry) => expiry,
            None => default_expiry(input.join_date)?,
        };
        validate_expiry(input.join_date, membership_expiry)?;

        Ok(Self {
            id,
            first_name,
            last_name,
            email,
            phone: input.phone.trim().to_string(),
            membership_type: input.membership_type,
            status: MemberStatus::Active,
            join_date: input.join_date,
            last_visit: Some(input.join_date),
            membership_expiry,
            goals: Vec::new(),
            workout_plans: Vec::new(),
            progress_photos: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update, validating only the supplied fields plus
    /// the join/expiry ordering of the merged result.
    ///
    /// On error the member is left untouched.
    pub fn apply(
        &mut self,
        patch: MemberPatch,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        let mut staged = self.clone();

        if let Some(first_name) = patch.first_name {
            staged.first_name = validate_name("first_name", &first_name)?;
        }
        if let Some(last_name) = patch.last_name {
            staged.last_name = validate_name("last_name", &last_name)?;
        }
        if let Some(email) = patch.email {
            staged.email = validate_email(&email)?;
        }
        if let Some(phone) = patch.phone {
            staged.phone = phone.trim().to_string();
        }
        if let Some(membership_type) = patch.membership_type {
            membership_type.validate()?;
            staged.membership_type = membership_type;
        }
        if let Some(status) = patch.status {
            staged.status = status;
        }
        if let Some(join_date) = patch.join_date {
            validate_join_date(join_date, today)?;
            staged.join_date = join_date;
        }
        if let Some(last_visit) = patch.last_visit {
            staged.last_visit = Some(last_visit);
        }
        if let Some(expiry) = patch.membership_expiry {
            staged.membership_expiry = expiry;
        }
        validate_expiry(staged.join_date, staged.membership_expiry)?;

        staged.updated_at = now;
        *self = staged;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Days from `today` until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.membership_expiry - today).num_days()
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.membership_expiry < today
    }

    /// True when the query is a case-insensitive substring of the first
    /// name, last name, or email. `query` must already be lower-cased.
    pub(crate) fn matches_query(&self, query: &str) -> bool {
        self.first_name.to_lowercase().contains(query)
            || self.last_name.to_lowercase().contains(query)
            || self.email.to_lowercase().contains(query)
    }

    pub fn goal(&self, goal_id: GoalId) -> Option<&FitnessGoal> {
        self.goals.iter().find(|g| g.id() == goal_id)
    }

    pub(crate) fn goal_mut(&mut self, goal_id: GoalId) -> Option<&mut FitnessGoal> {
        self.goals.iter_mut().find(|g| g.id() == goal_id)
    }

    pub fn workout_plan(&self, plan_id: WorkoutPlanId) -> Option<&WorkoutPlan> {
        self.workout_plans.iter().find(|p| p.id == plan_id)
    }

    pub fn progress_photo(&self, photo_id: PhotoId) -> Option<&ProgressPhoto> {
        self.progress_photos.iter().find(|p| p.id == photo_id)
    }

    /// Bumps the audit timestamp after a child collection changed.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

fn validate_join_date(join_date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if join_date > today {
        return Err(ValidationError::out_of_range(
            "join_date",
            format!("must not be in the future (today is {})", today),
        ));
    }
    Ok(())
}

fn validate_expiry(join_date: NaiveDate, expiry: NaiveDate) -> Result<(), ValidationError> {
    if expiry < join_date {
        return Err(ValidationError::out_of_range(
            "membership_expiry",
            format!("must be on or after the join date {}", join_date),
        ));
    }
    Ok(())
}
