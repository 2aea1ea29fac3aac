//! Member-specific error types.
//!
//! Covers the member registry and everything it owns (goals, workout plans,
//! progress photos).
//!
//! | Error | Kind |
//! |-------|------|
//! | MemberNotFound, GoalNotFound, WorkoutPlanNotFound, PhotoNotFound | not found |
//! | DuplicateEmail, DuplicateId | duplicate |
//! | Validation | validation |
//! | Infrastructure | storage |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, GoalId, MemberId, PhotoId, ValidationError, WorkoutPlanId,
};

/// Errors raised by member registry and goal tracker operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Goal {goal_id} not found for member {member_id}")]
    GoalNotFound { member_id: MemberId, goal_id: GoalId },

    #[error("Workout plan {plan_id} not found for member {member_id}")]
    WorkoutPlanNotFound {
        member_id: MemberId,
        plan_id: WorkoutPlanId,
    },

    #[error("Progress photo {photo_id} not found for member {member_id}")]
    PhotoNotFound { member_id: MemberId, photo_id: PhotoId },

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Member id {0} is already registered")]
    DuplicateId(MemberId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl MemberError {
    pub fn member_not_found(id: MemberId) -> Self {
        MemberError::MemberNotFound(id)
    }

    pub fn goal_not_found(member_id: MemberId, goal_id: GoalId) -> Self {
        MemberError::GoalNotFound { member_id, goal_id }
    }

    pub fn workout_plan_not_found(member_id: MemberId, plan_id: WorkoutPlanId) -> Self {
        MemberError::WorkoutPlanNotFound { member_id, plan_id }
    }

    pub fn photo_not_found(member_id: MemberId, photo_id: PhotoId) -> Self {
        MemberError::PhotoNotFound { member_id, photo_id }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        MemberError::DuplicateEmail(email.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MemberError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MemberError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            MemberError::GoalNotFound { .. } => ErrorCode::GoalNotFound,
            MemberError::WorkoutPlanNotFound { .. } => ErrorCode::WorkoutPlanNotFound,
            MemberError::PhotoNotFound { .. } => ErrorCode::PhotoNotFound,
            MemberError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            MemberError::DuplicateId(_) => ErrorCode::DuplicateId,
            MemberError::Validation(err) => err.code(),
            MemberError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code().is_not_found()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MemberError::Validation(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, MemberError::DuplicateEmail(_) | MemberError::DuplicateId(_))
    }
}

impl From<DomainError> for MemberError {
    fn from(err: DomainError) -> Self {
        MemberError::Infrastructure(err.to_string())
    }
}

impl From<MemberError> for DomainError {
    fn from(err: MemberError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match &err {
            MemberError::Validation(v) => domain.with_detail("field", v.field()),
            MemberError::MemberNotFound(id) => domain.with_detail("member_id", id.to_string()),
            MemberError::GoalNotFound { member_id, goal_id } => domain
                .with_detail("member_id", member_id.to_string())
                .with_detail("goal_id", goal_id.to_string()),
            MemberError::DuplicateEmail(email) => domain.with_detail("email", email.clone()),
            _ => domain,
        }
    }
}
