//! Terminal view: renders timer snapshots and notifications

use std::{io::Write, sync::Arc};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::{AppState, Notification, NotificationKind, Phase, TimerSnapshot, TimerStatus};

/// One-line description of the timer, e.g. `[focus] study 24:59 (running)`
pub fn describe(snapshot: &TimerSnapshot) -> String {
    let phase = match snapshot.phase {
        Phase::Study => "study",
        Phase::Break => "break",
    };
    let status = match snapshot.status {
        TimerStatus::Idle => "idle",
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
    };
    format!("[{}] {} {} ({})", snapshot.mode, phase, snapshot.display, status)
}

/// Whether a snapshot change is worth an info-level line rather than a
/// per-second debug line
fn is_transition(previous: Option<&TimerSnapshot>, next: &TimerSnapshot) -> bool {
    match previous {
        None => true,
        Some(prev) => {
            prev.mode != next.mode || prev.phase != next.phase || prev.status != next.status
        }
    }
}

fn show_notification(notification: &Notification, bell: bool) {
    match notification.kind {
        NotificationKind::Info => info!("{}", notification.message),
        NotificationKind::Tip => info!("Study tip: {}", notification.message),
        NotificationKind::Error => warn!("{}", notification.message),
        NotificationKind::Chime => {
            if bell {
                let mut stdout = std::io::stdout();
                if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                    debug!("Failed to ring terminal bell: {}", e);
                }
            }
        }
    }
}

/// Background task subscribing to timer updates and notifications
pub async fn display_task(state: Arc<AppState>, bell: bool) {
    info!("Starting display task");

    let mut updates = state.timer_update_tx.subscribe();
    let mut notifications = state.notification_tx.subscribe();
    let mut last: Option<TimerSnapshot> = None;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if is_transition(last.as_ref(), &snapshot) {
                    info!("{}", describe(&snapshot));
                } else if last.as_ref().map(|l| l.remaining_seconds) != Some(snapshot.remaining_seconds) {
                    debug!("{}", describe(&snapshot));
                }
                last = Some(snapshot);
            }

            received = notifications.recv() => {
                match received {
                    Ok(notification) => show_notification(&notification, bell),
                    Err(RecvError::Lagged(skipped)) => warn!("Display skipped {} notifications", skipped),
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    info!("Display task stopped");
}
