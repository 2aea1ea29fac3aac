//! Scheduling Adapters
//!
//! - **RenewalTimer** - tokio interval driving the renewal check

mod renewal_timer;

pub use renewal_timer::{RenewalTimer, RenewalTimerConfig, RenewalTimerHandle};
