//! Subscription handlers.

mod create_subscription;
mod manage_subscription;

pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use manage_subscription::{
    ListSubscriptionsHandler, ManageSubscriptionCommand, ManageSubscriptionHandler,
};
