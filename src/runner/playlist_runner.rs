//! Shared playlist runner driving the state machine from a tick scheduler

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{
    error::RunnerError,
    playlist::{Playlist, Timer},
    state::{Playback, RunnerSnapshot},
};

use super::{
    core::{PlaylistCore, TickEffect, TickOutcome},
    RepeatPolicy, TickScheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Stop,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Stop => "stop",
        })
    }
}

struct Inner {
    core: PlaylistCore,
    /// Bumped whenever the pending tick is replaced or cancelled
    generation: u64,
    pending: Option<super::TickHandle>,
}

impl Inner {
    fn disarm(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

struct Shared {
    playlist: Arc<Playlist>,
    scheduler: Arc<dyn TickScheduler>,
    inner: Mutex<Inner>,
    updates: watch::Sender<RunnerSnapshot>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Inner>, RunnerError> {
        self.inner
            .lock()
            .map_err(|e| RunnerError::LockPoisoned(e.to_string()))
    }

    fn enact(self: &Arc<Self>, inner: &mut Inner, effect: TickEffect) {
        match effect {
            TickEffect::Keep => {}
            TickEffect::Cancel => inner.disarm(),
            TickEffect::Arm => {
                inner.disarm();
                let generation = inner.generation;
                let shared: Weak<Shared> = Arc::downgrade(self);
                inner.pending = Some(self.scheduler.schedule(Box::new(move || {
                    if let Some(shared) = shared.upgrade() {
                        shared.on_tick(generation);
                    }
                })));
            }
        }
    }

    fn publish(&self, inner: &Inner) -> RunnerSnapshot {
        let snapshot = inner.core.snapshot();
        self.updates.send_replace(snapshot.clone());
        snapshot
    }

    fn on_tick(self: &Arc<Self>, generation: u64) {
        let mut inner = match self.lock() {
            Ok(inner) => inner,
            Err(e) => {
                error!("Dropping tick: {}", e);
                return;
            }
        };

        // A tick that raced with pause/stop carries an old generation.
        if inner.generation != generation {
            debug!(
                "Discarding stale tick (generation {}, current {})",
                generation, inner.generation
            );
            return;
        }

        inner.pending = None;
        let mut core = inner.core.clone();
        let outcome = core.tick();
        self.enact(&mut inner, outcome.effect());
        inner.core = core;
        let snapshot = self.publish(&inner);
        drop(inner);

        self.log_outcome(outcome, &snapshot);
    }

    fn log_outcome(&self, outcome: TickOutcome, snapshot: &RunnerSnapshot) {
        let title = |index: usize| {
            self.playlist
                .get(index)
                .map(|t| t.title.as_str())
                .unwrap_or("<unknown>")
        };

        match outcome {
            TickOutcome::Ignored => debug!("Tick ignored while {}", snapshot.playback),
            TickOutcome::Counted { elapsed } => debug!("Tick: elapsed={}", elapsed),
            TickOutcome::Repeated { cycles_completed } => info!(
                "Cycle complete, repeating ({} repeats done)",
                cycles_completed
            ),
            TickOutcome::Advanced { from, to } => {
                info!("Timer '{}' finished, advancing to '{}'", title(from), title(to))
            }
            TickOutcome::Finished { last } => {
                info!("Timer '{}' finished, no next timer, stopping", title(last))
            }
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Ok(inner) = self.inner.get_mut() {
            if let Some(handle) = inner.pending.take() {
                handle.cancel();
            }
        }
    }
}

/// Cloneable handle to one playlist runner.
///
/// Every command and every tick is applied under one lock and published as
/// a single [`RunnerSnapshot`], so readers never observe half-applied state.
#[derive(Clone)]
pub struct PlaylistRunner {
    shared: Arc<Shared>,
}

impl PlaylistRunner {
    pub fn new(
        playlist: Playlist,
        policy: RepeatPolicy,
        scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        let playlist = Arc::new(playlist);
        let core = PlaylistCore::new(Arc::clone(&playlist), policy);
        let (updates, _) = watch::channel(core.snapshot());

        Self {
            shared: Arc::new(Shared {
                playlist,
                scheduler,
                inner: Mutex::new(Inner {
                    core,
                    generation: 0,
                    pending: None,
                }),
                updates,
            }),
        }
    }

    /// Start or resume playback
    pub fn start(&self) -> Result<RunnerSnapshot, RunnerError> {
        self.apply(Command::Start)
    }

    /// Pause playback, keeping the active timer and its progress
    pub fn pause(&self) -> Result<RunnerSnapshot, RunnerError> {
        self.apply(Command::Pause)
    }

    /// Stop playback and clear the active timer
    pub fn stop(&self) -> Result<RunnerSnapshot, RunnerError> {
        self.apply(Command::Stop)
    }

    fn apply(&self, command: Command) -> Result<RunnerSnapshot, RunnerError> {
        let mut inner = self.shared.lock()?;
        let before = inner.core.playback();

        // The new core state is committed only once its tick is armed.
        let mut core = inner.core.clone();
        let effect = match command {
            Command::Start => core.start(),
            Command::Pause => core.pause(),
            Command::Stop => core.stop(),
        };
        self.shared.enact(&mut inner, effect);
        inner.core = core;
        let snapshot = self.shared.publish(&inner);
        drop(inner);

        if before == snapshot.playback {
            debug!("Command {} had no effect while {}", command, before);
        } else {
            info!(
                "Command {}: {} -> {} (timer: {})",
                command,
                before,
                snapshot.playback,
                snapshot.active_timer().map(|t| t.title.as_str()).unwrap_or("none")
            );
        }
        Ok(snapshot)
    }

    /// Latest published state
    pub fn snapshot(&self) -> RunnerSnapshot {
        self.shared.updates.borrow().clone()
    }

    pub fn playback(&self) -> Playback {
        self.shared.updates.borrow().playback
    }

    pub fn active_timer(&self) -> Option<Timer> {
        self.shared.updates.borrow().active_timer().cloned()
    }

    pub fn elapsed(&self) -> u32 {
        self.shared.updates.borrow().elapsed
    }

    pub fn cycles_completed(&self) -> u32 {
        self.shared.updates.borrow().cycles_completed
    }

    /// Receive every snapshot published after a command or tick
    pub fn subscribe(&self) -> watch::Receiver<RunnerSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn timers(&self) -> &[Timer] {
        self.shared.playlist.timers()
    }
}

impl fmt::Debug for PlaylistRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistRunner")
            .field("timers", &self.shared.playlist.len())
            .field("state", &*self.shared.updates.borrow())
            .finish()
    }
}
