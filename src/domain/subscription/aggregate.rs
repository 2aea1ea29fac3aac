//! Subscription entity.
//!
//! A subscription references its member by id only. Deleting the member
//! leaves its subscriptions in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, StateMachine, SubscriptionId, Timestamp, ValidationError};

use super::{PaymentStatus, SubscriptionError, SubscriptionStatus};

/// Input for opening a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionInput {
    pub member_id: MemberId,
    pub member_name: String,
    pub plan_id: String,
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub auto_renew: bool,
    pub payment_status: PaymentStatus,
}

impl SubscriptionInput {
    /// Pending payment, no auto-renew.
    pub fn new(
        member_id: MemberId,
        member_name: impl Into<String>,
        plan_id: impl Into<String>,
        plan_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            member_id,
            member_name: member_name.into(),
            plan_id: plan_id.into(),
            plan_name: plan_name.into(),
            start_date,
            end_date,
            auto_renew: false,
            payment_status: PaymentStatus::default(),
        }
    }

    pub fn with_auto_renew(mut self, auto_renew: bool) -> Self {
        self.auto_renew = auto_renew;
        self
    }

    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }
}

/// Subscription to a plan.
///
/// # Invariants
///
/// - `start_date <= end_date`
/// - status changes follow [`SubscriptionStatus`] transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub member_id: MemberId,
    pub member_name: String,
    pub plan_id: String,
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub payment_status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    pub fn create(
        id: SubscriptionId,
        input: SubscriptionInput,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let member_name = required(&input.member_name, "member_name")?;
        let plan_id = required(&input.plan_id, "plan_id")?;
        let plan_name = required(&input.plan_name, "plan_name")?;
        if input.end_date < input.start_date {
            return Err(ValidationError::out_of_range(
                "end_date",
                "must not be before start_date",
            ));
        }

        Ok(Self {
            id,
            member_id: input.member_id,
            member_name,
            plan_id,
            plan_name,
            start_date: input.start_date,
            end_date: input.end_date,
            status: SubscriptionStatus::Active,
            auto_renew: input.auto_renew,
            payment_status: input.payment_status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Active, past its end date and not set to renew itself.
    pub fn has_lapsed(&self, today: NaiveDate) -> bool {
        self.is_active() && !self.auto_renew && self.end_date < today
    }

    /// Active to cancelled. Auto-renew is switched off.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), SubscriptionError> {
        if !self.is_active() {
            return Err(SubscriptionError::invalid_state(self.status, "cancel"));
        }
        self.transition(SubscriptionStatus::Cancelled, "cancel")?;
        self.auto_renew = false;
        self.updated_at = now;
        Ok(())
    }

    /// Pushes the end date out and (re)activates.
    pub fn renew(&mut self, new_end: NaiveDate, now: Timestamp) -> Result<(), SubscriptionError> {
        if new_end <= self.end_date {
            return Err(ValidationError::out_of_range(
                "end_date",
                format!("must be after current end date {}", self.end_date),
            )
            .into());
        }
        self.transition(SubscriptionStatus::Active, "renew")?;
        self.end_date = new_end;
        self.updated_at = now;
        Ok(())
    }

    pub fn expire(&mut self, now: Timestamp) -> Result<(), SubscriptionError> {
        self.transition(SubscriptionStatus::Expired, "expire")?;
        self.updated_at = now;
        Ok(())
    }

    pub fn record_payment(&mut self, payment_status: PaymentStatus, now: Timestamp) {
        self.payment_status = payment_status;
        self.updated_at = now;
    }

    fn transition(
        &mut self,
        target: SubscriptionStatus,
        attempted: &str,
    ) -> Result<(), SubscriptionError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| SubscriptionError::invalid_state(self.status, attempted))?;
        Ok(())
    }
}

fn required(value: &str, field: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
