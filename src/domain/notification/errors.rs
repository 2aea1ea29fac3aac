//! Notification-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, NotificationId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    #[error("Member not found: {0}")]
    UnknownMember(MemberId),

    #[error("Notification id {0} is already stored")]
    DuplicateId(NotificationId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl NotificationError {
    pub fn not_found(id: NotificationId) -> Self {
        NotificationError::NotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            NotificationError::NotFound(_) => ErrorCode::NotificationNotFound,
            NotificationError::UnknownMember(_) => ErrorCode::MemberNotFound,
            NotificationError::DuplicateId(_) => ErrorCode::DuplicateId,
            NotificationError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NotificationError::NotFound(_) | NotificationError::UnknownMember(_)
        )
    }
}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        NotificationError::Infrastructure(err.to_string())
    }
}

impl From<NotificationError> for DomainError {
    fn from(err: NotificationError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            NotificationError::NotFound(id) => domain.with_detail("notification_id", id.to_string()),
            NotificationError::UnknownMember(id) => domain.with_detail("member_id", id.to_string()),
            _ => domain,
        }
    }
}
