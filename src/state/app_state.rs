//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, Result, TimerError},
    services::BackendClient,
    tasks::dispatch_effects,
};
use super::{
    Effect, Mode, ModePresets, Notification, NotificationLog, SessionId, TimerController, TimerSnapshot,
};

/// Shared state: the timer, its notifications and the backend it reports to
#[derive(Debug)]
pub struct AppState {
    /// Countdown state machine
    pub controller: Arc<Mutex<TimerController>>,
    /// Recent user-visible notifications
    pub notifications: Arc<Mutex<NotificationLog>>,
    /// Study backend
    pub backend: BackendClient,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Notification fan-out to the view layer
    pub notification_tx: broadcast::Sender<Notification>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, backend: BackendClient, presets: ModePresets) -> Self {
        let controller = TimerController::new(presets);
        let (notification_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(controller.snapshot());

        Self {
            controller: Arc::new(Mutex::new(controller)),
            notifications: Arc::new(Mutex::new(NotificationLog::new())),
            backend,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            notification_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Run `f` against the controller and publish the resulting snapshot
    fn with_controller<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TimerController) -> T,
    {
        let mut controller = self.controller.lock()
            .map_err(|_| AppError::StatePoisoned("timer"))?;

        let out = f(&mut *controller);
        let snapshot = controller.snapshot();
        drop(controller);

        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(out)
    }

    /// Apply a user action, record it and carry out the effects it produced
    fn apply_action<F>(self: &Arc<Self>, action: &str, f: F) -> Result<TimerSnapshot>
    where
        F: FnOnce(&mut TimerController) -> std::result::Result<Vec<Effect>, TimerError>,
    {
        let effects = self.with_controller(f)??;
        self.record_action(action);
        dispatch_effects(self, effects);
        self.get_timer_state()
    }

    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot> {
        info!("Start requested");
        self.apply_action("start", |c| c.start())
    }

    pub fn pause(self: &Arc<Self>) -> Result<TimerSnapshot> {
        self.apply_action("pause", |c| c.pause().map(|_| Vec::new()))
    }

    pub fn resume(self: &Arc<Self>) -> Result<TimerSnapshot> {
        self.apply_action("resume", |c| c.resume().map(|_| Vec::new()))
    }

    pub fn reset(self: &Arc<Self>) -> Result<TimerSnapshot> {
        self.apply_action("reset", |c| {
            c.reset();
            Ok(Vec::new())
        })
    }

    /// Switch mode; rejected custom fields are reported as notifications
    pub fn set_mode(
        self: &Arc<Self>,
        mode: Mode,
        study: Option<&str>,
        brk: Option<&str>,
    ) -> Result<TimerSnapshot> {
        let rejected = self.with_controller(|c| c.set_mode(mode, study, brk))??;
        self.report_rejected_input(&rejected);
        self.record_action("mode");
        self.get_timer_state()
    }

    /// Edit the custom study/break durations
    pub fn set_custom(self: &Arc<Self>, study: Option<&str>, brk: Option<&str>) -> Result<TimerSnapshot> {
        let rejected = self.with_controller(|c| c.set_custom(study, brk))??;
        self.report_rejected_input(&rejected);
        self.record_action("custom");
        self.get_timer_state()
    }

    /// Advance the countdown by one second
    pub fn tick(self: &Arc<Self>) -> Result<()> {
        let effects = self.with_controller(|c| c.tick())?;
        if !effects.is_empty() {
            dispatch_effects(self, effects);
        }
        Ok(())
    }

    /// Hand a completed session-start back to the timer
    pub fn session_started(&self, ticket: u64, session_id: SessionId) -> Result<bool> {
        self.with_controller(|c| c.session_started(ticket, session_id))
    }

    /// Log a notification and push it to the view layer
    pub fn notify(&self, notification: Notification) {
        match self.notifications.lock() {
            Ok(mut log) => log.push(notification.clone()),
            Err(e) => warn!("Failed to lock notification log: {}", e),
        }

        // No receivers just means no view is attached
        if self.notification_tx.send(notification).is_err() {
            debug!("No notification subscribers");
        }
    }

    pub fn get_notifications(&self) -> Result<Vec<Notification>> {
        self.notifications.lock()
            .map(|log| log.entries())
            .map_err(|_| AppError::StatePoisoned("notification"))
    }

    /// Most recent logged notification, if any
    pub fn latest_notification(&self) -> Result<Option<Notification>> {
        self.notifications.lock()
            .map(|log| log.latest().cloned())
            .map_err(|_| AppError::StatePoisoned("notification"))
    }

    pub fn dismiss_notifications(&self) -> Result<usize> {
        self.notifications.lock()
            .map(|mut log| log.dismiss_all())
            .map_err(|_| AppError::StatePoisoned("notification"))
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerSnapshot> {
        self.controller.lock()
            .map(|c| c.snapshot())
            .map_err(|_| AppError::StatePoisoned("timer"))
    }

    /// Log out of the backend. The timer is torn down with the session.
    pub async fn logout(self: &Arc<Self>) -> Result<()> {
        match self.backend.logout().await {
            Ok(()) => {
                self.reset()?;
                self.record_action("logout");
                self.notify(Notification::info("Logged out"));
                Ok(())
            }
            Err(e) => {
                warn!("Logout failed: {}", e);
                self.notify(Notification::error("Logout failed. Please try again."));
                Err(e.into())
            }
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn report_rejected_input(&self, rejected: &[TimerError]) {
        for e in rejected {
            warn!("Keeping last valid custom duration: {}", e);
            self.notify(Notification::error(format!("{}; keeping previous value", e)));
        }
    }
}
