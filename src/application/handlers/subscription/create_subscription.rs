//! CreateSubscriptionHandler - Command handler for opening subscriptions.

use tracing::info;

use crate::application::GymContext;
use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionInput};

/// Command to open a subscription for an existing member.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub input: SubscriptionInput,
}

pub struct CreateSubscriptionHandler {
    context: GymContext,
}

impl CreateSubscriptionHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self, cmd: CreateSubscriptionCommand) -> Result<Subscription, SubscriptionError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let before = state.clone();

        let member_id = cmd.input.member_id;
        if state.registry.find(member_id).is_err() {
            return Err(SubscriptionError::UnknownMember(member_id));
        }

        let subscription = state.subscriptions.create(cmd.input, now)?;
        self.context.commit(&mut state, before).await?;

        info!(
            member_id = %member_id,
            subscription_id = %subscription.id,
            plan_id = %subscription.plan_id,
            "Subscription created"
        );
        Ok(subscription)
    }
}
