//! Subscription-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SubscriptionId, ValidationError};

use super::SubscriptionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("Subscription not found: {0}")]
    NotFound(SubscriptionId),

    #[error("Cannot {attempted} a subscription that is {current}")]
    InvalidState {
        current: SubscriptionStatus,
        attempted: String,
    },

    #[error("Member not found: {0}")]
    UnknownMember(MemberId),

    #[error("Subscription id {0} is already stored")]
    DuplicateId(SubscriptionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn invalid_state(current: SubscriptionStatus, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current,
            attempted: attempted.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::NotFound(_) => ErrorCode::SubscriptionNotFound,
            SubscriptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SubscriptionError::UnknownMember(_) => ErrorCode::MemberNotFound,
            SubscriptionError::DuplicateId(_) => ErrorCode::DuplicateId,
            SubscriptionError::Validation(e) => e.code(),
            SubscriptionError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SubscriptionError::NotFound(_) | SubscriptionError::UnknownMember(_)
        )
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Infrastructure(err.to_string())
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            SubscriptionError::Validation(v) => v.into(),
            SubscriptionError::NotFound(id) => domain.with_detail("subscription_id", id.to_string()),
            SubscriptionError::UnknownMember(id) => domain.with_detail("member_id", id.to_string()),
            SubscriptionError::InvalidState { current, attempted } => domain
                .with_detail("current", current.to_string())
                .with_detail("attempted", attempted),
            _ => domain,
        }
    }
}
