//! SubscriptionLedger - the subscription collection.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::foundation::{MemberId, SubscriptionId, Timestamp};

use super::{PaymentStatus, Subscription, SubscriptionError, SubscriptionInput};

/// Subscriptions in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionLedger {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(subscriptions: Vec<Subscription>) -> Result<Self, SubscriptionError> {
        let mut ids = HashSet::new();
        for s in &subscriptions {
            if !ids.insert(s.id) {
                return Err(SubscriptionError::DuplicateId(s.id));
            }
        }
        Ok(Self { subscriptions })
    }

    /// Opens a subscription.
    ///
    /// The member id is not checked against the registry; callers that
    /// need that guarantee check it first.
    pub fn create(
        &mut self,
        input: SubscriptionInput,
        now: Timestamp,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = Subscription::create(SubscriptionId::new(), input, now)?;
        self.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    pub fn find(&self, id: SubscriptionId) -> Result<&Subscription, SubscriptionError> {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SubscriptionError::not_found(id))
    }

    pub fn list_for_member(&self, member_id: MemberId) -> Vec<&Subscription> {
        self.subscriptions
            .iter()
            .filter(|s| s.member_id == member_id)
            .collect()
    }

    pub fn cancel(&mut self, id: SubscriptionId, now: Timestamp) -> Result<Subscription, SubscriptionError> {
        let subscription = self.find_mut(id)?;
        subscription.cancel(now)?;
        Ok(subscription.clone())
    }

    pub fn renew(
        &mut self,
        id: SubscriptionId,
        new_end: NaiveDate,
        now: Timestamp,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = self.find_mut(id)?;
        subscription.renew(new_end, now)?;
        Ok(subscription.clone())
    }

    pub fn record_payment(
        &mut self,
        id: SubscriptionId,
        payment_status: PaymentStatus,
        now: Timestamp,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = self.find_mut(id)?;
        subscription.record_payment(payment_status, now);
        Ok(subscription.clone())
    }

    /// Expires every lapsed subscription as of `now`'s date and returns
    /// their ids.
    pub fn expire_lapsed(&mut self, now: Timestamp) -> Vec<SubscriptionId> {
        let today = now.date();
        let mut expired = Vec::new();
        for subscription in self.subscriptions.iter_mut().filter(|s| s.has_lapsed(today)) {
            if subscription.expire(now).is_ok() {
                expired.push(subscription.id);
            }
        }
        expired
    }

    pub fn all(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    fn find_mut(&mut self, id: SubscriptionId) -> Result<&mut Subscription, SubscriptionError> {
        self.subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SubscriptionError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::SubscriptionStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(member_id: MemberId, end: NaiveDate) -> SubscriptionInput {
        SubscriptionInput::new(member_id, "Jane Roe", "p1", "Monthly", date(2024, 1, 1), end)
    }

    #[test]
    fn create_then_find_and_list() {
        let mut ledger = SubscriptionLedger::new();
        let member = MemberId::new();
        let sub = ledger.create(input(member, date(2024, 2, 1)), Timestamp::now()).unwrap();
        ledger.create(input(MemberId::new(), date(2024, 2, 1)), Timestamp::now()).unwrap();

        assert_eq!(ledger.find(sub.id).unwrap(), &sub);
        assert_eq!(ledger.list_for_member(member).len(), 1);
    }

    #[test]
    fn invalid_input_is_not_stored() {
        let mut ledger = SubscriptionLedger::new();
        let result = ledger.create(input(MemberId::new(), date(2023, 1, 1)), Timestamp::now());
        assert!(matches!(result, Err(SubscriptionError::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn operations_on_unknown_id_are_not_found() {
        let mut ledger = SubscriptionLedger::new();
        let id = SubscriptionId::new();
        assert!(ledger.cancel(id, Timestamp::now()).unwrap_err().is_not_found());
        assert!(ledger.renew(id, date(2030, 1, 1), Timestamp::now()).unwrap_err().is_not_found());
        assert!(ledger
            .record_payment(id, PaymentStatus::Paid, Timestamp::now())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn record_payment_updates_status() {
        let mut ledger = SubscriptionLedger::new();
        let sub = ledger.create(input(MemberId::new(), date(2024, 2, 1)), Timestamp::now()).unwrap();
        let paid = ledger.record_payment(sub.id, PaymentStatus::Paid, Timestamp::now()).unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn expire_lapsed_skips_auto_renew_and_current() {
        let mut ledger = SubscriptionLedger::new();
        let lapsed = ledger.create(input(MemberId::new(), date(2024, 2, 1)), Timestamp::now()).unwrap();
        ledger
            .create(input(MemberId::new(), date(2024, 2, 1)).with_auto_renew(true), Timestamp::now())
            .unwrap();
        ledger.create(input(MemberId::new(), date(2024, 6, 1)), Timestamp::now()).unwrap();

        let now = Timestamp::start_of(date(2024, 3, 1));
        assert_eq!(ledger.expire_lapsed(now), vec![lapsed.id]);
        assert_eq!(ledger.find(lapsed.id).unwrap().status, SubscriptionStatus::Expired);

        assert!(ledger.expire_lapsed(now).is_empty());
    }

    #[test]
    fn cancelled_subscriptions_are_not_expired() {
        let mut ledger = SubscriptionLedger::new();
        let sub = ledger.create(input(MemberId::new(), date(2024, 2, 1)), Timestamp::now()).unwrap();
        ledger.cancel(sub.id, Timestamp::now()).unwrap();

        assert!(ledger.expire_lapsed(Timestamp::start_of(date(2024, 3, 1))).is_empty());
        assert_eq!(ledger.find(sub.id).unwrap().status, SubscriptionStatus::Cancelled);
    }

    #[test]
    fn restore_rejects_duplicate_ids() {
        let mut ledger = SubscriptionLedger::new();
        let sub = ledger.create(input(MemberId::new(), date(2024, 2, 1)), Timestamp::now()).unwrap();
        assert!(matches!(
            SubscriptionLedger::restore(vec![sub.clone(), sub]),
            Err(SubscriptionError::DuplicateId(_))
        ));
    }
}
