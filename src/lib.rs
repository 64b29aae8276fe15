//! Study Timer - focus/break countdown that syncs sessions with a study backend
//! 
//! This library provides the timer state machine, the backend client and the
//! local control API used by the `study-timer` daemon.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, BackendError, TimerError};
pub use state::{AppState, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
