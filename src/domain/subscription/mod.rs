//! Subscription domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Subscription entity and its input
//! - `status` - SubscriptionStatus (state machine) and PaymentStatus
//! - `ledger` - SubscriptionLedger, the subscription collection
//! - `errors` - SubscriptionError

mod aggregate;
mod errors;
mod ledger;
mod status;

pub use aggregate::{Subscription, SubscriptionInput};
pub use errors::SubscriptionError;
pub use ledger::SubscriptionLedger;
pub use status::{PaymentStatus, SubscriptionStatus};
