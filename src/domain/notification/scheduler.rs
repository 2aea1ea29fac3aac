//! NotificationScheduler - turns due renewals into notifications.
//!
//! One renewal epoch is (member id, expiry date). While an unread renewal
//! notification for an epoch exists, further runs emit nothing for it. A new
//! expiry date opens a new epoch.

use tracing::debug;

use crate::domain::foundation::Timestamp;
use crate::domain::member::Member;

use super::renewal_policy::renewal_message;
use super::{Notification, NotificationInput, NotificationStore, NotificationType, RenewalPolicy};

/// Evaluates the renewal policy across members and writes reminders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationScheduler {
    policy: RenewalPolicy,
}

impl NotificationScheduler {
    pub fn new(policy: RenewalPolicy) -> Self {
        Self { policy }
    }

    pub fn with_horizon(horizon_days: u32) -> Self {
        Self::new(RenewalPolicy::new(horizon_days))
    }

    pub fn policy(&self) -> &RenewalPolicy {
        &self.policy
    }

    /// Runs the renewal check over `members` and returns only the
    /// notifications created by this run.
    pub fn run<'a, I>(&self, members: I, store: &mut NotificationStore, now: Timestamp) -> Vec<Notification>
    where
        I: IntoIterator<Item = &'a Member>,
    {
        members
            .into_iter()
            .filter_map(|member| self.check_member(member, store, now))
            .collect()
    }

    /// Same rule as [`run`](Self::run), for a single member.
    pub fn check_member(
        &self,
        member: &Member,
        store: &mut NotificationStore,
        now: Timestamp,
    ) -> Option<Notification> {
        let expiry = member.membership_expiry;
        let urgency = self.policy.urgency(expiry, now.date())?;

        if store.find_unread_renewal(member.id, expiry).is_some() {
            debug!(member_id = %member.id, expiry = %expiry, "Renewal reminder already pending");
            return None;
        }

        let message = renewal_message(&member.full_name(), expiry, urgency);
        let notification = store.create(
            NotificationInput::new(member.id, NotificationType::Renewal, message),
            now,
        );
        debug!(
            member_id = %member.id,
            notification_id = %notification.id(),
            urgency = %urgency,
            "Renewal reminder created"
        );
        Some(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::{MemberInput, MemberPatch, MemberRegistry};
    use chrono::{Days, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate) -> Timestamp {
        Timestamp::start_of(d)
    }

    fn registry_with(expiry: NaiveDate, today: NaiveDate) -> MemberRegistry {
        let mut registry = MemberRegistry::new();
        registry
            .create(
                MemberInput::new("John", "Doe", "john@x.com", date(2023, 1, 1)).with_expiry(expiry),
                at(today),
            )
            .unwrap();
        registry
    }

    #[test]
    fn emits_one_reminder_per_due_member() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 6, 20), today);
        let mut store = NotificationStore::new();

        let created = NotificationScheduler::default().run(registry.members(), &mut store, at(today));

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].kind(), NotificationType::Renewal);
        assert!(created[0].message().contains("2024-06-20"));
        assert!(created[0].message().contains("due soon"));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 6, 20), today);
        let mut store = NotificationStore::new();
        let scheduler = NotificationScheduler::default();

        scheduler.run(registry.members(), &mut store, at(today));
        let again = scheduler.run(registry.members(), &mut store, at(today));

        assert!(again.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reading_the_reminder_reopens_the_epoch() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 6, 20), today);
        let mut store = NotificationStore::new();
        let scheduler = NotificationScheduler::default();

        let first = scheduler.run(registry.members(), &mut store, at(today));
        store.mark_as_read(first[0].id()).unwrap();
        let second = scheduler.run(registry.members(), &mut store, at(today));

        assert_eq!(second.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn expired_membership_uses_expired_urgency() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 5, 1), today);
        let mut store = NotificationStore::new();

        let created = NotificationScheduler::default().run(registry.members(), &mut store, at(today));
        assert!(created[0].message().contains("(expired)"));
    }

    #[test]
    fn far_expiry_emits_nothing() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 12, 1), today);
        let mut store = NotificationStore::new();

        let created = NotificationScheduler::default().run(registry.members(), &mut store, at(today));
        assert!(created.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn expiry_moves_in_then_out_then_in_again() {
        let today = date(2024, 6, 1);
        let mut registry = registry_with(today.checked_add_days(Days::new(31)).unwrap(), today);
        let id = registry.members()[0].id;
        let mut store = NotificationStore::new();
        let scheduler = NotificationScheduler::default();

        assert!(scheduler.run(registry.members(), &mut store, at(today)).is_empty());

        let due = today.checked_add_days(Days::new(29)).unwrap();
        registry
            .update(id, MemberPatch { membership_expiry: Some(due), ..Default::default() }, at(today))
            .unwrap();
        let created = scheduler.run(registry.members(), &mut store, at(today));
        assert_eq!(created.len(), 1);
        assert!(created[0].message().contains(&due.format("%Y-%m-%d").to_string()));

        // A different expiry date is a new epoch even with the old one unread.
        let closer = today.checked_add_days(Days::new(10)).unwrap();
        registry
            .update(id, MemberPatch { membership_expiry: Some(closer), ..Default::default() }, at(today))
            .unwrap();
        let created = scheduler.run(registry.members(), &mut store, at(today));
        assert_eq!(created.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn custom_horizon_narrows_window() {
        let today = date(2024, 6, 1);
        let registry = registry_with(date(2024, 6, 20), today);
        let mut store = NotificationStore::new();

        let created = NotificationScheduler::with_horizon(7).run(registry.members(), &mut store, at(today));
        assert!(created.is_empty());
    }
}
