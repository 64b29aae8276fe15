//! Study Timer - focus/break countdown daemon
//! 
//! This is the main entry point for the study-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::BackendClient,
    tasks::{display_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, backend={}, custom={}/{}min",
          config.host, config.port, config.backend_url, config.custom_study, config.custom_break);

    let backend = BackendClient::new(&config.backend_url, config.cookie.as_deref())?;

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        backend,
        config.presets(),
    ));

    // Start the tick loop and the terminal view
    tokio::spawn(ticker_task(Arc::clone(&state)));
    tokio::spawn(display_task(Arc::clone(&state), !config.quiet));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start|pause|resume|reset - Control the countdown");
    info!("  POST /timer/mode                     - Switch mode (focus, deep, custom)");
    info!("  POST /timer/custom                   - Edit custom durations");
    info!("  GET  /status                         - Current timer state");
    info!("  GET  /notifications                  - Recent notifications");
    info!("  GET  /achievements, /study-groups    - Backend panels");
    info!("  GET  /health                         - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
