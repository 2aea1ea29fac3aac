//! Notification handlers.

mod inbox;
mod run_renewal_check;

pub use inbox::{
    ClearNotificationsHandler, CreateNotificationCommand, CreateNotificationHandler, Inbox,
    ListNotificationsHandler, MarkNotificationReadCommand, MarkNotificationReadHandler,
};
pub use run_renewal_check::{RenewalCheckResult, RunRenewalCheckHandler};
