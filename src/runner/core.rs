//! Timer advancement state machine
//!
//! `PlaylistCore` holds the whole runner state and applies commands and
//! ticks synchronously. Each operation reports what should happen to the
//! pending tick; arming and cancelling real ticks is left to the caller.

use std::sync::Arc;

use crate::{
    playlist::{Playlist, Timer},
    state::{ActiveTimer, Playback, RunnerSnapshot},
};

use super::RepeatPolicy;

/// What the caller must do with the tick schedule after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEffect {
    /// Arm a fresh tick one unit ahead
    Arm,
    /// Cancel whatever tick is pending
    Cancel,
    /// Leave the schedule as it is
    Keep,
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The runner was not running; nothing changed
    Ignored,
    /// Elapsed advanced inside the current cycle
    Counted { elapsed: u32 },
    /// A cycle finished and the same timer starts another one
    Repeated { cycles_completed: u32 },
    /// All cycles finished and the next timer became active
    Advanced { from: usize, to: usize },
    /// All cycles finished with no valid next timer; the runner stopped
    Finished { last: usize },
}

impl TickOutcome {
    pub fn effect(&self) -> TickEffect {
        match self {
            TickOutcome::Ignored => TickEffect::Keep,
            TickOutcome::Finished { .. } => TickEffect::Cancel,
            TickOutcome::Counted { .. }
            | TickOutcome::Repeated { .. }
            | TickOutcome::Advanced { .. } => TickEffect::Arm,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistCore {
    playlist: Arc<Playlist>,
    policy: RepeatPolicy,
    playback: Playback,
    active: Option<usize>,
    elapsed: u32,
    cycles_completed: u32,
}

impl PlaylistCore {
    pub fn new(playlist: Arc<Playlist>, policy: RepeatPolicy) -> Self {
        Self {
            playlist,
            policy,
            playback: Playback::Stopped,
            active: None,
            elapsed: 0,
            cycles_completed: 0,
        }
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_timer(&self) -> Option<&Timer> {
        self.active.and_then(|index| self.playlist.get(index))
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Start or resume playback.
    ///
    /// From `Stopped` this selects the first valid timer; when there is none
    /// the runner stays `Stopped` and nothing is armed. From `Paused` the
    /// active timer keeps its progress and a fresh tick is armed.
    pub fn start(&mut self) -> TickEffect {
        match self.playback {
            Playback::Running => TickEffect::Keep,
            Playback::Paused => {
                self.playback = Playback::Running;
                TickEffect::Arm
            }
            Playback::Stopped => {
                let Some(first) = self.first_valid() else {
                    return TickEffect::Keep;
                };
                self.activate(Some(first));
                self.playback = Playback::Running;
                TickEffect::Arm
            }
        }
    }

    pub fn pause(&mut self) -> TickEffect {
        if self.playback != Playback::Running {
            return TickEffect::Keep;
        }
        self.playback = Playback::Paused;
        TickEffect::Cancel
    }

    pub fn stop(&mut self) -> TickEffect {
        if self.playback == Playback::Stopped {
            return TickEffect::Keep;
        }
        self.playback = Playback::Stopped;
        self.activate(None);
        TickEffect::Cancel
    }

    /// Deliver one tick to the active timer
    pub fn tick(&mut self) -> TickOutcome {
        if self.playback != Playback::Running {
            return TickOutcome::Ignored;
        }
        let Some((index, duration, repeat_count)) = self
            .active
            .and_then(|index| self.playlist.get(index).map(|t| (index, t.duration, t.repeat_count)))
        else {
            return TickOutcome::Ignored;
        };

        self.elapsed += 1;
        if self.elapsed < duration {
            return TickOutcome::Counted {
                elapsed: self.elapsed,
            };
        }

        if self.cycles_completed < repeat_count {
            self.elapsed = 0;
            self.cycles_completed += 1;
            return TickOutcome::Repeated {
                cycles_completed: self.cycles_completed,
            };
        }

        match self.valid_at(index + 1) {
            Some(next) => {
                self.activate(Some(next));
                TickOutcome::Advanced {
                    from: index,
                    to: next,
                }
            }
            None => {
                self.playback = Playback::Stopped;
                self.activate(None);
                TickOutcome::Finished { last: index }
            }
        }
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            playback: self.playback,
            active: self.active.and_then(|index| {
                self.playlist.get(index).map(|timer| ActiveTimer {
                    index,
                    timer: timer.clone(),
                })
            }),
            elapsed: self.elapsed,
            cycles_completed: self.cycles_completed,
        }
    }

    // Sole place where the active timer changes; counters always reset with it.
    fn activate(&mut self, index: Option<usize>) {
        self.active = index;
        self.elapsed = 0;
        self.cycles_completed = 0;
    }

    fn first_valid(&self) -> Option<usize> {
        self.playlist
            .timers()
            .iter()
            .position(|timer| self.policy.admits(timer))
    }

    fn valid_at(&self, index: usize) -> Option<usize> {
        self.playlist
            .get(index)
            .filter(|timer| self.policy.admits(timer))
            .map(|_| index)
    }
}
