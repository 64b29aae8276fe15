//! User-visible notifications

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many notifications the log keeps before dropping the oldest
pub const NOTIFICATION_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    /// Study tip returned by the backend when a session ends
    Tip,
    Error,
    /// Phase-change sound cue; not kept in the log
    Chime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn tip(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Tip, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn chime() -> Self {
        Self::new(NotificationKind::Chime, "")
    }
}

/// Bounded log of recent notifications, newest last
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        if notification.kind == NotificationKind::Chime {
            return;
        }
        if self.entries.len() == NOTIFICATION_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Drop every entry, returning how many were removed
    pub fn dismiss_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            tracing::debug!("Dismissed {} notifications", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
