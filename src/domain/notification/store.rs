//! NotificationStore - the notification collection.
//!
//! Constructed explicitly and passed to whoever needs it; there is no
//! process-wide instance.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, NotificationId, Timestamp};

use super::{Notification, NotificationError, NotificationInput, NotificationType};

/// Notifications in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted notifications, keeping their read
    /// flags and timestamps.
    pub fn restore(notifications: Vec<Notification>) -> Result<Self, NotificationError> {
        let mut ids = HashSet::new();
        for n in &notifications {
            if !ids.insert(n.id()) {
                return Err(NotificationError::DuplicateId(n.id()));
            }
        }
        Ok(Self { notifications })
    }

    /// Stores a new unread notification stamped with `now`.
    pub fn create(&mut self, input: NotificationInput, now: Timestamp) -> Notification {
        let notification = Notification::create(NotificationId::new(), input, now);
        self.notifications.push(notification.clone());
        notification
    }

    /// Every notification for the member, read or not, oldest first.
    pub fn list_for_member(&self, member_id: MemberId) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.member_id() == member_id)
            .collect()
    }

    pub fn find(&self, id: NotificationId) -> Result<&Notification, NotificationError> {
        self.notifications
            .iter()
            .find(|n| n.id() == id)
            .ok_or_else(|| NotificationError::not_found(id))
    }

    /// Marks a notification read. Already-read notifications are left as is.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no notification has this id
    pub fn mark_as_read(&mut self, id: NotificationId) -> Result<(), NotificationError> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or_else(|| NotificationError::not_found(id))?;
        notification.mark_read();
        Ok(())
    }

    /// Marks every notification of a member read; returns how many changed.
    pub fn mark_all_read_for_member(&mut self, member_id: MemberId) -> usize {
        let mut changed = 0;
        for n in self
            .notifications
            .iter_mut()
            .filter(|n| n.member_id() == member_id && !n.is_read())
        {
            n.mark_read();
            changed += 1;
        }
        changed
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
    }

    /// Drops every notification addressed to the member; returns the count.
    pub fn remove_for_member(&mut self, member_id: MemberId) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.member_id() != member_id);
        before - self.notifications.len()
    }

    pub fn unread_count(&self, member_id: MemberId) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.member_id() == member_id && !n.is_read())
            .count()
    }

    /// Unread renewal reminder for this member naming this expiry date.
    pub fn find_unread_renewal(&self, member_id: MemberId, expiry: NaiveDate) -> Option<&Notification> {
        self.notifications.iter().find(|n| {
            n.member_id() == member_id
                && n.kind() == NotificationType::Renewal
                && !n.is_read()
                && n.references_expiry(expiry)
        })
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
