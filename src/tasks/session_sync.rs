//! Carries out controller effects against the backend and the view layer

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::state::{AppState, Effect, Notification, SessionId, SessionRequest};

/// Execute effects in order. Backend calls are spawned so the tick loop
/// never waits on the network; their failures become notifications.
pub fn dispatch_effects(state: &Arc<AppState>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::StartSession(request) => {
                tokio::spawn(start_session(Arc::clone(state), request));
            }
            Effect::EndSession { session_id, duration } => {
                tokio::spawn(end_session(Arc::clone(state), session_id, duration));
            }
            Effect::Notify(message) => state.notify(Notification::info(message)),
            Effect::Chime => state.notify(Notification::chime()),
        }
    }
}

async fn start_session(state: Arc<AppState>, request: SessionRequest) {
    match state.backend.start_session(request.mode, request.duration).await {
        Ok(session_id) => match state.session_started(request.ticket, session_id) {
            Ok(true) => {}
            Ok(false) => debug!("Session for ticket {} arrived after the timer moved on", request.ticket),
            Err(e) => error!("Failed to record started session: {}", e),
        },
        Err(e) => {
            warn!("Session start failed for {:?} phase: {}", request.phase, e);
            state.notify(Notification::error(format!("Could not start session: {}", e)));
        }
    }
}

async fn end_session(state: Arc<AppState>, session_id: SessionId, duration: u32) {
    match state.backend.end_session(&session_id, duration).await {
        Ok(resp) => {
            if let Some(tip) = resp.study_tip.filter(|t| !t.trim().is_empty()) {
                state.notify(Notification::tip(tip));
            }
        }
        Err(e) => {
            warn!("Session end failed for {}: {}", session_id, e);
            state.notify(Notification::error(format!("Could not end session: {}", e)));
        }
    }
}
