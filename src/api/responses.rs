//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, TimerError},
    services::StudyGroup,
    state::{Notification, TimerSnapshot},
};

/// Response for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    pub fn ok(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub backend_url: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub latest_notification: Option<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissResponse {
    pub dismissed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreatedResponse {
    pub group_id: Option<i64>,
    pub groups: Vec<StudyGroup>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// JSON body returned with every error status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of POST /timer/mode. Duration fields accept numbers or strings, as
/// typed into a form.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
    #[serde(default)]
    pub study_minutes: Option<serde_json::Value>,
    #[serde(default)]
    pub break_minutes: Option<serde_json::Value>,
}

/// Body of POST /timer/custom
#[derive(Debug, Clone, Deserialize)]
pub struct CustomRequest {
    #[serde(default)]
    pub study_minutes: Option<serde_json::Value>,
    #[serde(default)]
    pub break_minutes: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupBody {
    pub name: String,
}

/// Raw text of a form field; `null` counts as absent
pub fn field_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Timer(TimerError::InvalidInput(_)) | AppError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Timer(_) => StatusCode::CONFLICT,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::StatePoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_text_accepts_numbers_and_strings() {
        assert_eq!(field_text(Some(&json!(45))), Some("45".to_string()));
        assert_eq!(field_text(Some(&json!("15"))), Some("15".to_string()));
        assert_eq!(field_text(Some(&json!(null))), None);
        assert_eq!(field_text(None), None);
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(AppError::from(TimerError::AlreadyRunning).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(TimerError::InvalidInput("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(crate::error::BackendError::rejected(500, "boom")).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
