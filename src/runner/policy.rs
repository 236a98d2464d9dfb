//! Repeat-count validity policy

use crate::playlist::Timer;

/// Decides which timers may become active.
///
/// Only candidates are checked: the first timer picked by `start` and the
/// next timer picked after a completed tenure. The timer already running is
/// never re-validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeatPolicy {
    min_repeat_count: u32,
}

impl RepeatPolicy {
    /// Every timer is selectable; `repeat_count == 0` means run once
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Timers with fewer than `min_repeat_count` additional cycles are not selectable
    pub fn require_repeats(min_repeat_count: u32) -> Self {
        Self { min_repeat_count }
    }

    pub fn min_repeat_count(&self) -> u32 {
        self.min_repeat_count
    }

    pub fn admits(&self, timer: &Timer) -> bool {
        timer.repeat_count >= self.min_repeat_count
    }
}
