//! Clock Port - where "now" comes from.
//!
//! Handlers never read the system clock directly, so tests can pin time.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Current calendar date (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
