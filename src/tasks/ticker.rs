//! One-second tick loop driving the countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that ticks the timer while it is running.
///
/// This is the only tick loop in the process. It arms a fresh interval when
/// the timer leaves Idle and drops it when the timer returns to Idle. A
/// restart the loop did not see go through Idle (reset then start between two
/// observations) is caught by the snapshot's `run` and re-arms the interval.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut updates = state.timer_update_tx.subscribe();

    loop {
        let armed_run = {
            let snapshot = updates.borrow_and_update();
            snapshot.status.is_running().then_some(snapshot.run)
        };
        let Some(armed_run) = armed_run else {
            if updates.changed().await.is_err() {
                break;
            }
            continue;
        };

        debug!("Tick loop armed for run {}", armed_run);
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = updates.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    let snapshot = updates.borrow_and_update();
                    if !snapshot.status.is_running() {
                        debug!("Timer idle, tick loop disarmed");
                        break;
                    }
                    if snapshot.run != armed_run {
                        debug!("Timer restarted, re-arming tick loop");
                        break;
                    }
                }
            }
        }
    }

    info!("Ticker task stopped");
}
