//! Notification domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Notification entity and its input
//! - `renewal_policy` - pure renewal due/urgency rules
//! - `scheduler` - NotificationScheduler, idempotent renewal reminders
//! - `store` - NotificationStore, the notification collection
//! - `errors` - NotificationError

mod aggregate;
mod errors;
mod renewal_policy;
mod scheduler;
mod store;

pub use aggregate::{Notification, NotificationInput, NotificationType};
pub use errors::NotificationError;
pub use renewal_policy::{
    format_expiry, is_renewal_due, message_expiry, renewal_message, RenewalPolicy, RenewalUrgency,
    DEFAULT_HORIZON_DAYS,
};
pub use scheduler::NotificationScheduler;
pub use store::NotificationStore;
