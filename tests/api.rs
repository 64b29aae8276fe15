use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use study_timer::{
    create_router,
    services::BackendClient,
    state::{AppState, ModePresets, Notification},
};
use tower::ServiceExt;

fn app(base_url: &str) -> (Router, Arc<AppState>) {
    let backend = BackendClient::new(base_url, None).expect("backend client");
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), backend, ModePresets::default()));
    (create_router(Arc::clone(&state)), state)
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn backend_with_sessions() -> mockito::ServerGuard {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/start-session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"session_id": 1}"#)
        .create_async()
        .await;
    server
}

#[tokio::test]
async fn timer_controls_follow_the_state_machine() {
    let server = backend_with_sessions().await;
    let (router, _state) = app(&server.url());

    let (status, body) = call(&router, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 1500);
    assert_eq!(body["timer"]["display"], "25:00");

    let (status, body) = call(&router, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (status, body) = call(&router, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "paused");
    assert_eq!(body["timer"]["paused"], true);

    let (status, _) = call(&router, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&router, "POST", "/timer/resume", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["paused"], false);

    let (status, body) = call(&router, "POST", "/timer/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["phase"], "study");
}

#[tokio::test]
async fn mode_switch_is_locked_while_running() {
    let server = backend_with_sessions().await;
    let (router, _state) = app(&server.url());

    call(&router, "POST", "/timer/start", None).await;
    let (status, _) = call(&router, "POST", "/timer/mode", Some(json!({"mode": "deep"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    call(&router, "POST", "/timer/reset", None).await;
    let (status, body) = call(
        &router,
        "POST",
        "/timer/mode",
        Some(json!({"mode": "custom", "study_minutes": 45, "break_minutes": "15"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["mode"], "custom");
    assert_eq!(body["timer"]["remaining_seconds"], 2700);
    assert_eq!(body["timer"]["break_minutes"], 15);

    let (_, body) = call(&router, "POST", "/timer/start", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 2700);
}

#[tokio::test]
async fn unknown_mode_is_a_bad_request() {
    let (router, _state) = app("http://127.0.0.1:1");
    let (status, body) = call(&router, "POST", "/timer/mode", Some(json!({"mode": "sprint"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("sprint"));
}

#[tokio::test]
async fn invalid_custom_duration_keeps_previous_value() {
    let (router, _state) = app("http://127.0.0.1:1");
    call(&router, "POST", "/timer/mode", Some(json!({"mode": "custom", "study_minutes": 30}))).await;

    let (status, body) = call(
        &router,
        "POST",
        "/timer/custom",
        Some(json!({"study_minutes": "half an hour"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["study_minutes"], 30);
    assert_eq!(body["timer"]["remaining_seconds"], 1800);

    let (_, body) = call(&router, "GET", "/notifications", None).await;
    let notes = body["notifications"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["kind"], "error");

    let (_, body) = call(&router, "POST", "/notifications/dismiss", None).await;
    assert_eq!(body["dismissed"], 1);
}

#[tokio::test]
async fn status_reports_timer_and_last_action() {
    let server = backend_with_sessions().await;
    let (router, _state) = app(&server.url());
    call(&router, "POST", "/timer/start", None).await;

    let (status, body) = call(&router, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["last_action"], "start");
    assert_eq!(body["backend_url"], server.url());
    assert_eq!(body["latest_notification"], Value::Null);
}

#[tokio::test]
async fn status_carries_the_newest_notification() {
    let server = backend_with_sessions().await;
    let (router, state) = app(&server.url());
    state.notify(Notification::info("older"));
    state.notify(Notification::error("newest"));

    let (status, body) = call(&router, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latest_notification"]["message"], "newest");
    assert_eq!(body["latest_notification"]["kind"], "error");
    assert_eq!(state.get_notifications().unwrap().len(), 2);
}

#[tokio::test]
async fn achievements_are_proxied() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/achievements")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"name": "Night Owl", "description": "Three late sessions",
                 "badge_image": "imgs/NightOwl.png", "earned": false}]"#,
        )
        .create_async()
        .await;
    let (router, _state) = app(&server.url());

    let (status, body) = call(&router, "GET", "/achievements", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Night Owl");
    assert_eq!(body[0]["earned"], false);
}

#[tokio::test]
async fn backend_failure_is_a_bad_gateway_and_notified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/study-groups")
        .with_status(500)
        .create_async()
        .await;
    let (router, state) = app(&server.url());

    let (status, _) = call(&router, "GET", "/study-groups", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let notes = state.get_notifications().unwrap();
    assert_eq!(notes.last().unwrap().message, "Failed to load study groups");
}

#[tokio::test]
async fn joining_a_group_reports_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/study-groups/2/join")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "member_count": 4, "message": "Successfully joined the group"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/study-groups/3/join")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "You are already a member of this group"}"#)
        .create_async()
        .await;
    let (router, state) = app(&server.url());

    let (status, body) = call(&router, "POST", "/study-groups/2/join", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member_count"], 4);
    assert_eq!(
        state.get_notifications().unwrap().last().unwrap().message,
        "Successfully joined the group!"
    );

    let (status, _) = call(&router, "POST", "/study-groups/3/join", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        state.get_notifications().unwrap().last().unwrap().message,
        "You are already a member of this group"
    );
}

#[tokio::test]
async fn creating_a_group_returns_refreshed_list() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/study-groups")
        .match_body(mockito::Matcher::Json(json!({"name": "Organic Chemistry"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "group_id": 9}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/study-groups")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 9, "name": "Organic Chemistry", "member_count": 1, "is_member": true}]"#)
        .create_async()
        .await;
    let (router, _state) = app(&server.url());

    let (status, body) = call(
        &router,
        "POST",
        "/study-groups",
        Some(json!({"name": "  Organic Chemistry "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group_id"], 9);
    assert_eq!(body["groups"][0]["is_member"], true);
    create.assert_async().await;

    let (status, _) = call(&router, "POST", "/study-groups", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_resets_the_timer() {
    let mut server = backend_with_sessions().await;
    server
        .mock("POST", "/logout")
        .with_status(200)
        .create_async()
        .await;
    let (router, _state) = app(&server.url());

    call(&router, "POST", "/timer/start", None).await;
    let (status, body) = call(&router, "POST", "/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _state) = app("http://127.0.0.1:1");
    let (status, body) = call(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
