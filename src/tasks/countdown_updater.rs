//! Countdown updater background task

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::sleep;
use tracing::debug;

use crate::state::CountdownState;

/// How often the updater recomputes the remaining time
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Background task that refreshes `remaining` for one countdown generation.
///
/// `duration` and `started_at` are captured once; the remaining time is
/// recomputed from elapsed time on every tick rather than decremented. The
/// task exits when the countdown is stopped, runs out, or a newer `start`
/// bumps the epoch.
pub async fn countdown_updater_task(state: Arc<Mutex<CountdownState>>, epoch: u64) {
    let (duration, started_at) = {
        let guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        (guard.duration, guard.started_at)
    };

    loop {
        {
            let guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if !guard.should_poll(epoch) {
                break;
            }
        }

        sleep(POLL_INTERVAL).await;

        let mut guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.epoch != epoch {
            break;
        }
        if !guard.running {
            continue;
        }
        guard.remaining = duration.saturating_sub(started_at.elapsed());
    }

    debug!("Countdown updater for epoch {} exited", epoch);
}
