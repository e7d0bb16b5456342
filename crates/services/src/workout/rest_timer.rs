use std::time::Duration;

use fit_core::SessionPhase;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Period between rest countdown ticks.
pub const REST_TICK: Duration = Duration::from_secs(1);

/// Host-side one-second ticker for the rest countdown.
///
/// Runs only while the session reports `Resting`. The first tick lands one full
/// period after the timer starts. Call [`RestTimer::sync`] after every transition.
#[derive(Debug)]
pub struct RestTimer {
    interval: Option<Interval>,
    period: Duration,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_period(REST_TICK)
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self {
            interval: None,
            period,
        }
    }

    /// Start or stop the ticker to match `phase`. A running ticker is left untouched.
    pub fn sync(&mut self, phase: SessionPhase) {
        if phase != SessionPhase::Resting {
            self.stop();
            return;
        }
        if self.interval.is_none() {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.interval = Some(interval);
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick. Never resolves while stopped, which keeps a
    /// `select!` arm idle outside rest.
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
