//! Runner state snapshot as seen by observers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::playlist::Timer;

/// Transport state of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playback {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl Playback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Playback::Stopped => "stopped",
            Playback::Running => "running",
            Playback::Paused => "paused",
        }
    }
}

impl fmt::Display for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The timer currently accumulating ticks, with its playlist position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub index: usize,
    pub timer: Timer,
}

/// Consistent copy of the runner state, published after every command and tick
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub playback: Playback,
    pub active: Option<ActiveTimer>,
    pub elapsed: u32,
    pub cycles_completed: u32,
}

impl RunnerSnapshot {
    /// Create the initial stopped snapshot
    pub fn stopped() -> Self {
        Self::default()
    }

    pub fn active_timer(&self) -> Option<&Timer> {
        self.active.as_ref().map(|active| &active.timer)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    /// Ticks left in the current cycle of the active timer
    pub fn remaining_in_cycle(&self) -> Option<u32> {
        self.active_timer()
            .map(|timer| timer.duration.saturating_sub(self.elapsed))
    }
}
