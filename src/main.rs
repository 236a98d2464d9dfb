//! Timer Playlist - runs an ordered list of repeating timers
//!
//! This is the main entry point for the timer-playlist server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use timer_playlist::{
    config::Config,
    runner::{PlaylistRunner, TokioScheduler},
    state::AppState,
    api::create_router,
    tasks::progress_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timer_playlist={},tower_http=info", config.log_level()))
        .init();

    info!("Starting timer-playlist server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let playlist = config.load_playlist()?;
    for (index, timer) in playlist.timers().iter().enumerate() {
        info!("  #{} '{}' duration={} repeat={}", index, timer.title, timer.duration, timer.repeat_count);
    }

    let policy = config.repeat_policy();
    info!("Timers need at least {} repeats to become active", policy.min_repeat_count());

    let runner = PlaylistRunner::new(
        playlist,
        policy,
        Arc::new(TokioScheduler::new(config.tick_period())?),
    );

    // Log runner transitions in the background
    tokio::spawn(progress_log_task(runner.subscribe()));

    let state = Arc::new(AppState::new(runner.clone(), config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the playlist");
    info!("  POST /pause  - Pause the active timer");
    info!("  POST /stop   - Stop and reset the playlist");
    info!("  GET  /status - Current runner state");
    info!("  GET  /timers - Playlist with the active timer flagged");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for shutdown signals: {}", e);
            }
            info!("Shutdown signal received");
        }
    }

    runner.stop()?;
    info!("Server shutdown complete");
    Ok(())
}
