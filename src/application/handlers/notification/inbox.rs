//! Notification read surface and direct creation.

use tracing::info;

use crate::application::GymContext;
use crate::domain::foundation::{MemberId, NotificationId};
use crate::domain::notification::{Notification, NotificationError, NotificationInput};

/// A member's notifications, oldest first.
#[derive(Debug, Clone)]
pub struct Inbox {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

pub struct ListNotificationsHandler {
    context: GymContext,
}

impl ListNotificationsHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    /// Unknown members simply have an empty inbox.
    pub async fn handle(&self, member_id: MemberId) -> Inbox {
        let state = self.context.state.lock().await;
        Inbox {
            notifications: state
                .notifications
                .list_for_member(member_id)
                .into_iter()
                .cloned()
                .collect(),
            unread: state.notifications.unread_count(member_id),
        }
    }
}

/// Command to mark one notification read.
#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub notification_id: NotificationId,
}

pub struct MarkNotificationReadHandler {
    context: GymContext,
}

impl MarkNotificationReadHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: MarkNotificationReadCommand) -> Result<(), NotificationError> {
        let mut state = self.context.state.lock().await;
        let before = state.clone();
        let was_read = state.notifications.find(cmd.notification_id)?.is_read();
        if was_read {
            return Ok(());
        }

        state.notifications.mark_as_read(cmd.notification_id)?;
        self.context.commit(&mut state, before).await?;

        info!(notification_id = %cmd.notification_id, "Notification read");
        Ok(())
    }
}

pub struct ClearNotificationsHandler {
    context: GymContext,
}

impl ClearNotificationsHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    /// Drops every notification; returns how many were removed.
    pub async fn handle(&self) -> Result<usize, NotificationError> {
        let mut state = self.context.state.lock().await;
        let before = state.clone();
        let removed = state.notifications.len();
        state.notifications.clear_all();
        self.context.commit(&mut state, before).await?;

        info!(removed, "Notifications cleared");
        Ok(removed)
    }
}

/// Command to create a notification of any type directly.
#[derive(Debug, Clone)]
pub struct CreateNotificationCommand {
    pub input: NotificationInput,
}

pub struct CreateNotificationHandler {
    context: GymContext,
}

impl CreateNotificationHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: CreateNotificationCommand) -> Result<Notification, NotificationError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();
        let member_id = cmd.input.member_id;
        if state.registry.find(member_id).is_err() {
            return Err(NotificationError::UnknownMember(member_id));
        }

        let notification = state.notifications.create(cmd.input, now);
        self.context.commit(&mut state, before).await?;

        info!(
            member_id = %member_id,
            notification_id = %notification.id(),
            kind = %notification.kind(),
            "Notification created"
        );
        Ok(notification)
    }
}
