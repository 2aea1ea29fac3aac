//! Renewal scheduler configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::notification::DEFAULT_HORIZON_DAYS;

const MAX_HORIZON_DAYS: u32 = 365;
const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Renewal check cadence and look-ahead
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Hours between renewal checks
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,

    /// Days ahead of expiry a reminder becomes due
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// Run a check as soon as the timer starts
    #[serde(default = "default_run_on_startup")]
    pub run_on_startup: bool,
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(60 * 60))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_hours == 0 || self.interval_hours > MAX_INTERVAL_HOURS {
            return Err(ValidationError::InvalidInterval);
        }
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ValidationError::InvalidHorizon(self.horizon_days));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
            horizon_days: default_horizon_days(),
            run_on_startup: default_run_on_startup(),
        }
    }
}

fn default_interval_hours() -> u64 {
    24
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_run_on_startup() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(86_400));
        assert_eq!(config.horizon_days, 30);
        assert!(config.run_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_interval_bounds() {
        for bad in [0, MAX_INTERVAL_HOURS + 1, u64::MAX] {
            let config = SchedulerConfig {
                interval_hours: bad,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidInterval));
        }
        let config = SchedulerConfig {
            interval_hours: MAX_INTERVAL_HOURS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_interval_does_not_overflow() {
        let config = SchedulerConfig {
            interval_hours: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_horizon_bounds() {
        for bad in [0, 366] {
            let config = SchedulerConfig {
                horizon_days: bad,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidHorizon(bad)));
        }
        let config = SchedulerConfig {
            horizon_days: 365,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
