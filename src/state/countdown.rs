//! Restartable countdown timer driven by a background updater task

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::runtime::Handle;
use tracing::{debug, error};

use super::CountdownState;
use crate::tasks::countdown_updater_task;

/// A countdown whose remaining time is refreshed by a background task.
///
/// Every `start` spawns a new updater and bumps the state's epoch, so an
/// updater left over from an earlier `start` exits without writing.
#[derive(Debug, Clone, Default)]
pub struct CountdownTimer {
    state: Arc<Mutex<CountdownState>>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CountdownState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a fresh countdown of `duration` and spawn its updater
    pub fn start(&self, duration: Duration) {
        let epoch = self.lock().begin(duration);
        debug!("Countdown started: {}s (epoch {})", duration.as_secs(), epoch);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(countdown_updater_task(Arc::clone(&self.state), epoch));
            }
            Err(e) => {
                error!("No async runtime available, countdown will not advance: {}", e);
            }
        }
    }

    /// Pause the countdown, keeping the remaining time as is
    pub fn stop(&self) {
        self.lock().running = false;
    }

    /// Mark the countdown as running again.
    ///
    /// This never spawns an updater. Once the updater has exited (the
    /// countdown reached zero, or `start` was never called) resuming has no
    /// visible effect until the next `start`.
    pub fn resume(&self) {
        self.lock().running = true;
    }

    /// Restart the countdown at its full duration.
    ///
    /// `_start` is accepted for call-site compatibility but has no effect: the
    /// countdown is always restarted.
    pub fn reset(&self, _start: bool) {
        if !self.is_finished() {
            self.stop();
        }
        let duration = self.lock().duration;
        self.start(duration);
    }

    pub fn remaining(&self) -> Duration {
        self.lock().remaining
    }

    pub fn is_finished(&self) -> bool {
        self.lock().is_finished()
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Get a copy of the current state
    pub fn snapshot(&self) -> CountdownState {
        self.lock().clone()
    }
}
