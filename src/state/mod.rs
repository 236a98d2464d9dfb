//! State management module
//! 
//! Runner snapshots shared with observers, and the HTTP application state.

pub mod app_state;
pub mod runner_state;

// Re-export main types
pub use app_state::AppState;
pub use runner_state::{ActiveTimer, Playback, RunnerSnapshot};
