//! RenewalTimer - background driver for the recurring renewal check.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 24h | Time between renewal checks |
//! | `run_on_startup` | true | Run once immediately instead of waiting a full interval |
//!
//! ## Graceful Shutdown
//!
//! The timer listens on a watch channel and stops between ticks. A check
//! that is already running finishes first.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::handlers::notification::RunRenewalCheckHandler;

/// Shortest period the loop will tick at.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the RenewalTimer.
#[derive(Debug, Clone)]
pub struct RenewalTimerConfig {
    pub interval: Duration,
    pub run_on_startup: bool,
}

impl Default for RenewalTimerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(24 * 60 * 60),
            run_on_startup: true,
        }
    }
}

impl RenewalTimerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_run_on_startup(mut self, run_on_startup: bool) -> Self {
        self.run_on_startup = run_on_startup;
        self
    }
}

/// Runs the renewal check on a fixed cadence.
pub struct RenewalTimer {
    handler: RunRenewalCheckHandler,
    config: RenewalTimerConfig,
}

impl RenewalTimer {
    pub fn new(handler: RunRenewalCheckHandler, config: RenewalTimerConfig) -> Self {
        Self { handler, config }
    }

    /// Run the timer loop until shutdown signal is received.
    ///
    /// A failed check is logged and retried on the next tick. An interval
    /// below [`MIN_INTERVAL`] is raised to it.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        if self.config.interval < MIN_INTERVAL {
            warn!(
                interval_ms = self.config.interval.as_millis() as u64,
                "Renewal interval too short, using the minimum"
            );
        }
        let period = self.config.interval.max(MIN_INTERVAL);
        let start = if self.config.run_on_startup {
            Instant::now()
        } else {
            Instant::now() + period
        };
        let mut interval = time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = period.as_secs(), "Renewal timer started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Renewal timer stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    /// One renewal check, errors logged.
    pub async fn tick(&self) {
        match self.handler.handle().await {
            Ok(result) => debug!(
                created = result.created.len(),
                expired_subscriptions = result.expired_subscriptions.len(),
                "Renewal timer tick"
            ),
            Err(e) => warn!(error = %e, "Renewal check failed"),
        }
    }

    /// Spawns the loop on the current runtime.
    pub fn spawn(self) -> RenewalTimerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(async move { self.run(shutdown_rx).await });
        RenewalTimerHandle { shutdown_tx, join }
    }
}

/// Handle to a spawned timer. Dropping it closes the shutdown channel,
/// which stops the loop as soon as any running check finishes;
/// [`shutdown`](Self::shutdown) also waits for the task to end.
pub struct RenewalTimerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RenewalTimerHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            warn!(error = %e, "Renewal timer task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::test_support::{date, test_gym, TestGym};
    use crate::domain::member::MemberInput;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    async fn due_member(gym: &TestGym) {
        let mut state = gym.context.state.lock().await;
        state
            .registry
            .create(
                MemberInput::new("A", "B", "a@b.co", date(2024, 1, 1)).with_expiry(date(2024, 6, 20)),
                gym.context.now(),
            )
            .unwrap();
    }

    async fn notification_count(gym: &TestGym) -> usize {
        gym.context.state.lock().await.notifications.len()
    }

    #[tokio::test(start_paused = true)]
    async fn runs_on_startup_then_stays_idempotent() {
        let gym = test_gym();
        due_member(&gym).await;

        let timer = RenewalTimer::new(
            RunRenewalCheckHandler::new(gym.context.clone()),
            RenewalTimerConfig::default(),
        );
        let handle = timer.spawn();

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(notification_count(&gym).await, 1);

        time::sleep(DAY * 3).await;
        assert_eq!(notification_count(&gym).await, 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_start_waits_one_interval() {
        let gym = test_gym();
        due_member(&gym).await;

        let timer = RenewalTimer::new(
            RunRenewalCheckHandler::new(gym.context.clone()),
            RenewalTimerConfig::default()
                .with_interval(Duration::from_secs(3600))
                .with_run_on_startup(false),
        );
        let handle = timer.spawn();

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(notification_count(&gym).await, 0);

        time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(notification_count(&gym).await, 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_loop() {
        let gym = test_gym();
        let handle = RenewalTimer::new(
            RunRenewalCheckHandler::new(gym.context.clone()),
            RenewalTimerConfig::default(),
        )
        .spawn();

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_keeps_running_at_minimum() {
        let gym = test_gym();
        let handle = RenewalTimer::new(
            RunRenewalCheckHandler::new(gym.context.clone()),
            RenewalTimerConfig::default().with_interval(Duration::ZERO),
        )
        .spawn();

        time::sleep(Duration::from_secs(5)).await;
        assert!(!handle.is_finished());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_loop() {
        let gym = test_gym();
        let RenewalTimerHandle { shutdown_tx, join } = RenewalTimer::new(
            RunRenewalCheckHandler::new(gym.context.clone()),
            RenewalTimerConfig::default(),
        )
        .spawn();

        drop(shutdown_tx);
        time::timeout(Duration::from_secs(1), join)
            .await
            .expect("loop should stop well before the next daily tick")
            .unwrap();
    }

    #[test]
    fn config_defaults_are_daily_and_immediate() {
        let config = RenewalTimerConfig::default();
        assert_eq!(config.interval, DAY);
        assert!(config.run_on_startup);
    }
}
