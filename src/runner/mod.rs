//! Playlist runner
//!
//! The state machine lives in [`core`]; [`PlaylistRunner`] wraps it with a
//! lock, a tick scheduler and a snapshot channel.

pub mod core;
pub mod playlist_runner;
pub mod policy;
pub mod scheduler;

pub use self::core::{PlaylistCore, TickEffect, TickOutcome};
pub use playlist_runner::PlaylistRunner;
pub use policy::RepeatPolicy;
pub use scheduler::{ManualScheduler, TickCallback, TickHandle, TickScheduler, TokioScheduler};
