//! Handlers for changing and reading existing subscriptions.

use chrono::NaiveDate;
use tracing::info;

use crate::application::GymContext;
use crate::domain::foundation::{MemberId, SubscriptionId};
use crate::domain::subscription::{PaymentStatus, Subscription, SubscriptionError};

/// Changes to an existing subscription.
#[derive(Debug, Clone)]
pub enum ManageSubscriptionCommand {
    Cancel {
        subscription_id: SubscriptionId,
    },
    Renew {
        subscription_id: SubscriptionId,
        new_end: NaiveDate,
    },
    RecordPayment {
        subscription_id: SubscriptionId,
        payment_status: PaymentStatus,
    },
}

impl ManageSubscriptionCommand {
    fn subscription_id(&self) -> SubscriptionId {
        match self {
            ManageSubscriptionCommand::Cancel { subscription_id }
            | ManageSubscriptionCommand::Renew { subscription_id, .. }
            | ManageSubscriptionCommand::RecordPayment { subscription_id, .. } => *subscription_id,
        }
    }

    fn action(&self) -> &'static str {
        match self {
            ManageSubscriptionCommand::Cancel { .. } => "cancel",
            ManageSubscriptionCommand::Renew { .. } => "renew",
            ManageSubscriptionCommand::RecordPayment { .. } => "record_payment",
        }
    }
}

pub struct ManageSubscriptionHandler {
    context: GymContext,
}

impl ManageSubscriptionHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: ManageSubscriptionCommand) -> Result<Subscription, SubscriptionError> {
        let now = self.context.now();
        let id = cmd.subscription_id();
        let action = cmd.action();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let subscription = match cmd {
            ManageSubscriptionCommand::Cancel { subscription_id } => {
                state.subscriptions.cancel(subscription_id, now)?
            }
            ManageSubscriptionCommand::Renew {
                subscription_id,
                new_end,
            } => state.subscriptions.renew(subscription_id, new_end, now)?,
            ManageSubscriptionCommand::RecordPayment {
                subscription_id,
                payment_status,
            } => state
                .subscriptions
                .record_payment(subscription_id, payment_status, now)?,
        };

        self.context.commit(&mut state, before).await?;

        info!(
            subscription_id = %id,
            action,
            status = %subscription.status,
            payment_status = %subscription.payment_status,
            "Subscription updated"
        );
        Ok(subscription)
    }
}

pub struct ListSubscriptionsHandler {
    context: GymContext,
}

impl ListSubscriptionsHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    /// Works for deleted members too; their subscriptions are kept.
    pub async fn handle(&self, member_id: MemberId) -> Vec<Subscription> {
        let state = self.context.state.lock().await;
        state
            .subscriptions
            .list_for_member(member_id)
            .into_iter()
            .cloned()
            .collect()
    }
}
