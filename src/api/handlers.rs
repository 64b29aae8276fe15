//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{info, warn};

use crate::{
    error::{AppError, BackendError, Result},
    services::{Achievement, JoinGroupResponse, StudyGroup},
    state::{AppState, Mode, Notification},
};
use super::responses::{
    field_text, CreateGroupBody, CustomRequest, DismissResponse, GroupCreatedResponse,
    HealthResponse, ModeRequest, NotificationsResponse, StatusResponse, TimerResponse,
};

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.start()?;
    Ok(Json(TimerResponse::ok("Timer started", timer)))
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.pause()?;
    Ok(Json(TimerResponse::ok("Timer paused", timer)))
}

/// Handle POST /timer/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.resume()?;
    Ok(Json(TimerResponse::ok("Timer resumed", timer)))
}

/// Handle POST /timer/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    let timer = state.reset()?;
    Ok(Json(TimerResponse::ok("Timer reset", timer)))
}

/// Handle POST /timer/mode - Switch preset while idle
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ModeRequest>,
) -> Result<Json<TimerResponse>> {
    let mode: Mode = body.mode.parse()?;
    let study = field_text(body.study_minutes.as_ref());
    let brk = field_text(body.break_minutes.as_ref());

    let timer = state.set_mode(mode, study.as_deref(), brk.as_deref())?;
    info!("Mode endpoint called - mode set to {}", mode);
    Ok(Json(TimerResponse::ok(format!("Mode set to {}", mode), timer)))
}

/// Handle POST /timer/custom - Edit custom durations while idle
pub async fn custom_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CustomRequest>,
) -> Result<Json<TimerResponse>> {
    let study = field_text(body.study_minutes.as_ref());
    let brk = field_text(body.break_minutes.as_ref());

    let timer = state.set_custom(study.as_deref(), brk.as_deref())?;
    Ok(Json(TimerResponse::ok("Custom durations updated", timer)))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>> {
    let timer = state.get_timer_state()?;
    let latest_notification = state.latest_notification()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        backend_url: state.backend.base_url().to_string(),
        last_action,
        last_action_time,
        latest_notification,
    }))
}

/// Handle GET /notifications
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationsResponse>> {
    Ok(Json(NotificationsResponse {
        notifications: state.get_notifications()?,
    }))
}

/// Handle POST /notifications/dismiss
pub async fn dismiss_handler(State(state): State<Arc<AppState>>) -> Result<Json<DismissResponse>> {
    Ok(Json(DismissResponse {
        dismissed: state.dismiss_notifications()?,
    }))
}

/// Handle GET /achievements - Fetch from the backend
pub async fn achievements_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Achievement>>> {
    state
        .backend
        .achievements()
        .await
        .map(Json)
        .map_err(|e| surface(&state, "Failed to load achievements", e))
}

/// Handle GET /study-groups - Fetch from the backend
pub async fn study_groups_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudyGroup>>> {
    state
        .backend
        .study_groups()
        .await
        .map(Json)
        .map_err(|e| surface(&state, "Failed to load study groups", e))
}

/// Handle POST /study-groups - Create a group and return the refreshed list
pub async fn create_group_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGroupBody>,
) -> Result<Json<GroupCreatedResponse>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("group name must not be empty".to_string()));
    }

    let created = state
        .backend
        .create_study_group(name)
        .await
        .map_err(|e| surface(&state, "Failed to create group", e))?;

    let groups = state
        .backend
        .study_groups()
        .await
        .map_err(|e| surface(&state, "Failed to load study groups", e))?;

    Ok(Json(GroupCreatedResponse {
        group_id: created.group_id,
        groups,
    }))
}

/// Handle POST /study-groups/:id/join
pub async fn join_group_handler(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<i64>,
) -> Result<Json<JoinGroupResponse>> {
    match state.backend.join_study_group(group_id).await {
        Ok(resp) => {
            state.notify(Notification::info("Successfully joined the group!"));
            Ok(Json(resp))
        }
        Err(BackendError::Rejected { status, message }) => {
            warn!("Join group {} rejected: {}", group_id, message);
            state.notify(Notification::error(message.clone()));
            Err(BackendError::Rejected { status, message }.into())
        }
        Err(e) => Err(surface(&state, "Error joining group", e)),
    }
}

/// Handle POST /logout
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>> {
    state.logout().await?;
    let timer = state.get_timer_state()?;
    Ok(Json(TimerResponse::ok("Logged out", timer)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Report a backend failure to the user and hand it back as an API error
fn surface(state: &AppState, context: &str, error: BackendError) -> AppError {
    warn!("{}: {}", context, error);
    state.notify(Notification::error(context));
    error.into()
}
