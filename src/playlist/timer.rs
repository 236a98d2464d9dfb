//! Timer definition

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a timer within a playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TimerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named timer: `duration` ticks per cycle, run once plus `repeat_count` more cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    #[serde(default = "TimerId::generate")]
    pub id: TimerId,
    pub title: String,
    pub duration: u32,
    #[serde(rename = "repeat", alias = "repeatCount", default)]
    pub repeat_count: u32,
}

impl Timer {
    /// Create a timer with a freshly generated id
    pub fn new(title: impl Into<String>, duration: u32, repeat_count: u32) -> Self {
        Self::with_id(TimerId::generate(), title, duration, repeat_count)
    }

    pub fn with_id(
        id: impl Into<TimerId>,
        title: impl Into<String>,
        duration: u32,
        repeat_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            repeat_count,
        }
    }

    /// Total number of cycles this timer runs before the playlist moves on
    pub fn total_cycles(&self) -> u32 {
        self.repeat_count.saturating_add(1)
    }
}
