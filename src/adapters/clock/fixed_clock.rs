//! Settable clock for tests and replays.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock that returns whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: RwLock::new(now) }
    }

    /// Midnight UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(Timestamp::start_of(date))
    }

    pub fn set(&self, now: Timestamp) {
        let mut guard = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.set(Timestamp::start_of(date));
    }

    pub fn advance_days(&self, days: i64) {
        let next = self.now().add_days(days);
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
