//! Timer state types and the published snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// Which interval of the cycle is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Study,
    Break,
}

/// Run status; `Paused` only exists while the timer is running, so a paused
/// idle timer is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    /// Whether the tick loop is driving this timer (running or paused)
    pub fn is_running(&self) -> bool {
        !matches!(self, TimerStatus::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, TimerStatus::Paused)
    }
}

/// Opaque backend session identifier, echoed back exactly as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(serde_json::Value);

impl SessionId {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Read-only view of the timer published to the view layer and the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub status: TimerStatus,
    pub paused: bool,
    /// Identifies the current start; changes on every restart
    pub run: u64,
    pub remaining_seconds: u32,
    pub display: String,
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub session_id: Option<SessionId>,
}

/// Render seconds as `MM:SS`, both fields padded to two digits
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(5999), "99:59");
    }

    #[test]
    fn format_clock_matches_minutes_and_seconds() {
        for seconds in 0..6000u32 {
            let rendered = format_clock(seconds);
            let (mm, ss) = rendered.split_once(':').unwrap();
            assert_eq!(mm.len(), 2);
            assert_eq!(ss.len(), 2);
            assert_eq!(mm.parse::<u32>().unwrap(), seconds / 60);
            assert_eq!(ss.parse::<u32>().unwrap(), seconds % 60);
        }
    }

    #[test]
    fn session_id_round_trips_opaquely() {
        let numeric: SessionId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "42");
        assert_eq!(numeric.to_string(), "42");

        let text: SessionId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(text.to_string(), "abc-1");
    }

    #[test]
    fn paused_implies_running() {
        assert!(TimerStatus::Paused.is_running());
        assert!(TimerStatus::Paused.is_paused());
        assert!(!TimerStatus::Idle.is_running());
        assert!(!TimerStatus::Idle.is_paused());
    }
}
