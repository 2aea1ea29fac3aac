//! RunRenewalCheckHandler - the recurring renewal sweep.
//!
//! Runs the notification scheduler over every member and expires lapsed
//! subscriptions, all under one lock. Safe to call at any cadence: an
//! unchanged state produces no new notifications.

use tracing::{debug, info};

use crate::application::GymContext;
use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp};
use crate::domain::notification::Notification;

/// Result of one sweep.
#[derive(Debug, Clone, Default)]
pub struct RenewalCheckResult {
    pub ran_at: Option<Timestamp>,
    /// Renewal notifications created by this run only.
    pub created: Vec<Notification>,
    pub expired_subscriptions: Vec<SubscriptionId>,
}

impl RenewalCheckResult {
    pub fn changed_anything(&self) -> bool {
        !self.created.is_empty() || !self.expired_subscriptions.is_empty()
    }
}

pub struct RunRenewalCheckHandler {
    context: GymContext,
}

impl RunRenewalCheckHandler {
    pub fn new(context: GymContext) -> Self {
        Self { context }
    }

    pub async fn handle(&self) -> Result<RenewalCheckResult, DomainError> {
        let now = self.context.now();
        let mut state = self.context.state.lock().await;
        let state = &mut *state;
        let before = state.clone();

        let created = self
            .context
            .scheduler
            .run(state.registry.members(), &mut state.notifications, now);
        let expired_subscriptions = state.subscriptions.expire_lapsed(now);

        let result = RenewalCheckResult {
            ran_at: Some(now),
            created,
            expired_subscriptions,
        };

        if result.changed_anything() {
            self.context.commit(state, before).await?;
            info!(
                created = result.created.len(),
                expired_subscriptions = result.expired_subscriptions.len(),
                "Renewal check finished"
            );
        } else {
            debug!(members = state.registry.len(), "Renewal check found nothing new");
        }

        Ok(result)
    }
}
