//! Error types for playlist loading and runner bookkeeping

use std::path::PathBuf;

use thiserror::Error;

/// Failures while building or loading a playlist
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid playlist json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("timer '{title}' has a zero duration")]
    ZeroDuration { title: String },

    #[error("duplicate timer id: {0}")]
    DuplicateId(String),
}

/// Failures that indicate a broken runner rather than a playlist edge case
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("runner state lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("no tokio runtime to schedule ticks on: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
