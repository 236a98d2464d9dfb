//! Timer Playlist - runs an ordered list of repeating timers
//!
//! This library provides the playlist runner state machine, its tick
//! schedulers, and an HTTP surface exposing start/pause/stop controls.

pub mod config;
pub mod error;
pub mod playlist;
pub mod runner;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PlaylistError, RunnerError};
pub use playlist::{Playlist, Timer, TimerId};
pub use runner::{ManualScheduler, PlaylistRunner, RepeatPolicy, TickScheduler, TokioScheduler};
pub use state::{AppState, Playback, RunnerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
