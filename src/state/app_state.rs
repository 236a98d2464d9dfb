//! Application state shared by the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{error::RunnerError, runner::PlaylistRunner};

use super::RunnerSnapshot;

/// Transport command accepted from the HTTP surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Start,
    Pause,
    Stop,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Start => "start",
            Transport::Pause => "pause",
            Transport::Stop => "stop",
        }
    }
}

/// Main application state: the runner plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub runner: PlaylistRunner,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(runner: PlaylistRunner, port: u16, host: String) -> Self {
        Self {
            runner,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply a transport command to the runner and remember it as the last action
    pub fn apply(&self, command: Transport) -> Result<RunnerSnapshot, RunnerError> {
        let snapshot = match command {
            Transport::Start => self.runner.start(),
            Transport::Pause => self.runner.pause(),
            Transport::Stop => self.runner.stop(),
        }?;

        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(command.as_str().to_string()),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
