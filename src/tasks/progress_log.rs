//! Playlist progress logging task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{Playback, RunnerSnapshot};

/// What changed between two consecutive snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PlaybackChanged { from: Playback, to: Playback },
    TimerChanged { title: Option<String> },
    CycleCompleted { title: String, cycles_completed: u32 },
    Ticked { elapsed: u32 },
}

/// Classify the transition from `prev` to `next`, most significant change first
pub fn describe(prev: &RunnerSnapshot, next: &RunnerSnapshot) -> Vec<Progress> {
    let mut changes = Vec::new();

    if prev.playback != next.playback {
        changes.push(Progress::PlaybackChanged {
            from: prev.playback,
            to: next.playback,
        });
    }

    let prev_id = prev.active_timer().map(|t| &t.id);
    let next_id = next.active_timer().map(|t| &t.id);
    if prev_id != next_id {
        changes.push(Progress::TimerChanged {
            title: next.active_timer().map(|t| t.title.clone()),
        });
    } else if let Some(timer) = next.active_timer() {
        if next.cycles_completed > prev.cycles_completed {
            changes.push(Progress::CycleCompleted {
                title: timer.title.clone(),
                cycles_completed: next.cycles_completed,
            });
        } else if next.elapsed != prev.elapsed {
            changes.push(Progress::Ticked {
                elapsed: next.elapsed,
            });
        }
    }

    changes
}

/// Background task that logs every runner transition until the runner goes away
pub async fn progress_log_task(mut updates: watch::Receiver<RunnerSnapshot>) {
    info!("Starting progress log task");

    let mut prev = updates.borrow_and_update().clone();
    while updates.changed().await.is_ok() {
        let next = updates.borrow_and_update().clone();

        for change in describe(&prev, &next) {
            match change {
                Progress::PlaybackChanged { from, to } => {
                    info!("Playback {} -> {}", from, to)
                }
                Progress::TimerChanged { title: Some(title) } => {
                    info!("Active timer: '{}'", title)
                }
                Progress::TimerChanged { title: None } => info!("No active timer"),
                Progress::CycleCompleted {
                    title,
                    cycles_completed,
                } => info!("'{}' completed repeat {}", title, cycles_completed),
                Progress::Ticked { elapsed } => {
                    debug!("elapsed={} remaining={:?}", elapsed, next.remaining_in_cycle())
                }
            }
        }

        prev = next;
    }

    debug!("Runner dropped, progress log task exiting");
}
