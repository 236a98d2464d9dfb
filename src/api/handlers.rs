//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{app_state::Transport, AppState, Playback};
use super::responses::{CommandResponse, HealthResponse, StatusResponse, TimerEntry};

fn transport(state: &AppState, command: Transport) -> Result<Json<CommandResponse>, StatusCode> {
    match state.apply(command) {
        Ok(snapshot) => {
            let message = match (command, snapshot.playback) {
                (Transport::Start, Playback::Running) => "Playlist running",
                (Transport::Start, _) => "No valid timer to start",
                (Transport::Pause, Playback::Paused) => "Playlist paused",
                (Transport::Pause, _) => "Playlist is not running",
                (Transport::Stop, _) => "Playlist stopped",
            };
            info!("{} endpoint called - {}", command.as_str(), message);
            Ok(Json(CommandResponse::new(message.to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to {} playlist: {}", command.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the playlist
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    transport(&state, Transport::Start)
}

/// Handle POST /pause - Pause the active timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    transport(&state, Transport::Pause)
}

/// Handle POST /stop - Stop and clear the active timer
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    transport(&state, Transport::Stop)
}

/// Handle GET /status - Return the runner state and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let runner = state.runner.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        remaining_in_cycle: runner.remaining_in_cycle(),
        runner,
        timer_count: state.runner.timers().len(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /timers - List the playlist, flagging the active timer
pub async fn timers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TimerEntry>> {
    let active = state.runner.snapshot().active_index();

    Json(
        state
            .runner
            .timers()
            .iter()
            .enumerate()
            .map(|(index, timer)| TimerEntry {
                timer: timer.clone(),
                active: Some(index) == active,
            })
            .collect(),
    )
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
