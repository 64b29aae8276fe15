//! HTTP API module
//!
//! Local control surface for the timer plus pass-through endpoints for the
//! backend's achievements, study groups and logout.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/resume", post(resume_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/mode", post(mode_handler))
        .route("/timer/custom", post(custom_handler))
        .route("/status", get(status_handler))
        .route("/notifications", get(notifications_handler))
        .route("/notifications/dismiss", post(dismiss_handler))
        .route("/achievements", get(achievements_handler))
        .route("/study-groups", get(study_groups_handler).post(create_group_handler))
        .route("/study-groups/:group_id/join", post(join_group_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
