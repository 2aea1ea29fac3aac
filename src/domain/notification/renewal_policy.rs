//! RenewalPolicy - decides when a membership renewal reminder is due.
//!
//! Pure functions of (expiry, today, horizon). Identical inputs always give
//! identical answers, which is what makes scheduler runs idempotent.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default look-ahead window in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Date format embedded in renewal messages and used for dedupe.
const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// How pressing a renewal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenewalUrgency {
    /// Expiry date is already behind us.
    Expired,
    /// Expiry falls between today and today + horizon, inclusive.
    DueSoon,
}

impl RenewalUrgency {
    pub fn label(&self) -> &'static str {
        match self {
            RenewalUrgency::Expired => "expired",
            RenewalUrgency::DueSoon => "due soon",
        }
    }
}

impl fmt::Display for RenewalUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Renewal evaluation with a configurable horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalPolicy {
    horizon_days: u32,
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS)
    }
}

impl RenewalPolicy {
    pub fn new(horizon_days: u32) -> Self {
        Self { horizon_days }
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Urgency of renewing a membership expiring on `expiry`, or `None`
    /// when it is further out than the horizon.
    pub fn urgency(&self, expiry: NaiveDate, today: NaiveDate) -> Option<RenewalUrgency> {
        if expiry < today {
            return Some(RenewalUrgency::Expired);
        }
        // Past the end of the calendar every expiry is inside the window.
        let within_horizon = today
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .map_or(true, |limit| expiry <= limit);
        within_horizon.then_some(RenewalUrgency::DueSoon)
    }

    /// Due when `expiry <= today + horizon`.
    pub fn is_due(&self, expiry: NaiveDate, today: NaiveDate) -> bool {
        self.urgency(expiry, today).is_some()
    }
}

/// Free-function form of [`RenewalPolicy::is_due`].
pub fn is_renewal_due(expiry: NaiveDate, today: NaiveDate, horizon_days: u32) -> bool {
    RenewalPolicy::new(horizon_days).is_due(expiry, today)
}

/// Formats an expiry date the way renewal messages embed it.
pub fn format_expiry(expiry: NaiveDate) -> String {
    expiry.format(EXPIRY_FORMAT).to_string()
}

/// Expiry date named by a reminder built with [`renewal_message`].
///
/// Only the date after the last `" on "` counts, so a member name that
/// happens to contain a date is ignored.
pub fn message_expiry(message: &str) -> Option<NaiveDate> {
    let start = message.rfind(" on ")? + " on ".len();
    let rest = &message[start..];
    let (date, tail) = rest.split_once(' ')?;
    if !tail.starts_with('(') {
        return None;
    }
    NaiveDate::parse_from_str(date, EXPIRY_FORMAT).ok()
}

/// Builds the reminder text for a member.
///
/// The scheduler recognises a reminder for the same expiry through
/// [`message_expiry`], so the `on <date> (<urgency>)` shape must stay last.
pub fn renewal_message(member_name: &str, expiry: NaiveDate, urgency: RenewalUrgency) -> String {
    let date = format_expiry(expiry);
    match urgency {
        RenewalUrgency::Expired => format!(
            "Membership for {} expired on {} ({}). Please renew to keep access.",
            member_name, date, urgency
        ),
        RenewalUrgency::DueSoon => format!(
            "Membership for {} expires on {} ({}). Please renew soon.",
            member_name, date, urgency
        ),
    }
}
