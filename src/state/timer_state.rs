//! Countdown state structure shared between the timer and its updater task

use std::time::Duration;
use tokio::time::Instant;

/// Countdown state guarded by the timer's mutex
#[derive(Debug, Clone)]
pub struct CountdownState {
    /// Length of one countdown, set by `start`
    pub duration: Duration,
    /// Time left, derived from wall-clock elapsed time on every tick
    pub remaining: Duration,
    pub running: bool,
    /// Generation of the most recent `start`; updaters from older generations stop writing
    pub epoch: u64,
    pub started_at: Instant,
}

impl CountdownState {
    /// Create an idle state that has never been started
    pub fn new() -> Self {
        Self {
            duration: Duration::ZERO,
            remaining: Duration::ZERO,
            running: false,
            epoch: 0,
            started_at: Instant::now(),
        }
    }

    /// Begin a new generation and return its epoch
    pub fn begin(&mut self, duration: Duration) -> u64 {
        self.duration = duration;
        self.remaining = duration;
        self.running = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.started_at = Instant::now();
        self.epoch
    }

    /// Check if the countdown has run out
    pub fn is_finished(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Whether the updater for `epoch` should keep polling
    pub fn should_poll(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.running && !self.is_finished()
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}
