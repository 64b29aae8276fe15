//! Error types shared across the timer, the backend client and the API

use thiserror::Error;

/// Rejected timer actions and invalid user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer is already running")]
    AlreadyRunning,

    #[error("Timer is not running")]
    NotRunning,

    #[error("Timer is not paused")]
    NotPaused,

    #[error("Mode cannot change while a timer is active; reset first")]
    ModeLocked,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures talking to the study backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the local control API
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to lock {0} state")]
    StatePoisoned(&'static str),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
