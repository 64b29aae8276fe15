//! State management module
//! 
//! Timer state machine, mode presets, notifications and the shared
//! application state that ties them to the backend.

pub mod app_state;
pub mod controller;
pub mod mode;
pub mod notifications;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::{Effect, SessionRequest, TimerController};
pub use mode::{Durations, Mode, ModePresets};
pub use notifications::{Notification, NotificationKind, NotificationLog};
pub use timer_state::{format_clock, Phase, SessionId, TimerSnapshot, TimerStatus};
