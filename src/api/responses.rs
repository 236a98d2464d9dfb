//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{playlist::Timer, state::RunnerSnapshot};

/// Response for the transport endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub runner: RunnerSnapshot,
}

impl CommandResponse {
    /// Build a response whose status mirrors the resulting playback state
    pub fn new(message: String, runner: RunnerSnapshot) -> Self {
        Self {
            status: runner.playback.as_str().to_string(),
            message,
            timestamp: Utc::now(),
            runner,
        }
    }
}

/// Status response with the full runner state and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub runner: RunnerSnapshot,
    pub remaining_in_cycle: Option<u32>,
    pub timer_count: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// One playlist row, flagged when it is the active timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEntry {
    #[serde(flatten)]
    pub timer: Timer,
    pub active: bool,
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
