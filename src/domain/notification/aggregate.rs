//! Notification entity.
//!
//! The read flag moves one way, unread to read; nothing else about a
//! notification changes after creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{MemberId, NotificationId, Timestamp};

use super::renewal_policy::message_expiry;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Renewal,
    Progress,
    Workout,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationType::Renewal => "renewal",
            NotificationType::Progress => "progress",
            NotificationType::Workout => "workout",
        };
        f.write_str(s)
    }
}

/// Input for creating a notification directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInput {
    pub member_id: MemberId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
}

impl NotificationInput {
    pub fn new(member_id: MemberId, kind: NotificationType, message: impl Into<String>) -> Self {
        Self {
            member_id,
            kind,
            message: message.into(),
        }
    }
}

/// A message addressed to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    member_id: MemberId,
    #[serde(rename = "type")]
    kind: NotificationType,
    message: String,
    created_at: Timestamp,
    read: bool,
}

impl Notification {
    pub(crate) fn create(id: NotificationId, input: NotificationInput, now: Timestamp) -> Self {
        Self {
            id,
            member_id: input.member_id,
            kind: input.kind,
            message: input.message.trim().to_string(),
            created_at: now,
            read: false,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// True for a renewal reminder whose message names this expiry date.
    pub fn references_expiry(&self, expiry: NaiveDate) -> bool {
        self.kind == NotificationType::Renewal && message_expiry(&self.message) == Some(expiry)
    }

    /// Unread to read. Calling it again is a no-op.
    pub(crate) fn mark_read(&mut self) {
        self.read = true;
    }
}
