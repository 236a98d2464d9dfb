//! Tick sources
//!
//! A [`TickScheduler`] arms a single callback one logical unit ahead and
//! hands back a [`TickHandle`] that can cancel it.

use std::{
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};

use tokio::{runtime::Handle, time::sleep};
use tracing::debug;

use crate::error::RunnerError;

/// Callback run when an armed tick fires
pub type TickCallback = Box<dyn FnOnce() + Send + 'static>;

/// Cancellation handle for one armed tick
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Arms one tick at a time for the runner
pub trait TickScheduler: Send + Sync + 'static {
    /// Run `fire` once, one logical unit from now, unless the handle is cancelled first
    fn schedule(&self, fire: TickCallback) -> TickHandle;
}

/// Real-time scheduler: each tick is a task sleeping for one period.
///
/// Ticks are spawned on the runtime that was current at construction, so
/// commands may be issued from threads outside of it.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    period: Duration,
    runtime: Handle,
}

impl TokioScheduler {
    /// Bind to the current Tokio runtime; fails when called outside one
    pub fn new(period: Duration) -> Result<Self, RunnerError> {
        Ok(Self::with_handle(period, Handle::try_current()?))
    }

    pub fn with_handle(period: Duration, runtime: Handle) -> Self {
        Self { period, runtime }
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&self, fire: TickCallback) -> TickHandle {
        let period = self.period;
        let task = self.runtime.spawn(async move {
            sleep(period).await;
            fire();
        });

        TickHandle::new(move || task.abort())
    }
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<(u64, TickCallback)>,
}

/// Caller-driven scheduler: ticks fire only when [`ManualScheduler::advance`] is called
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed ticks that have not fired or been cancelled
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Fire every tick armed so far. Ticks armed by those callbacks wait for the next call.
    pub fn advance(&self) -> usize {
        let due = self.take_pending();
        let fired = due.len();
        for fire in due {
            fire();
        }
        fired
    }

    /// Advance `units` times, returning how many ticks fired in total
    pub fn advance_by(&self, units: u32) -> usize {
        (0..units).map(|_| self.advance()).sum()
    }

    /// Detach armed ticks without firing them, as if they were already in flight.
    /// Cancelling their handles afterwards has no effect on the returned callbacks.
    pub fn take_pending(&self) -> Vec<TickCallback> {
        let mut queue = self.lock();
        std::mem::take(&mut queue.pending)
            .into_iter()
            .map(|(_, fire)| fire)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, fire: TickCallback) -> TickHandle {
        let id = {
            let mut queue = self.lock();
            let id = queue.next_id;
            queue.next_id += 1;
            queue.pending.push((id, fire));
            id
        };

        let queue: Weak<Mutex<ManualQueue>> = Arc::downgrade(&self.queue);
        TickHandle::new(move || {
            if let Some(queue) = queue.upgrade() {
                let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
                queue.pending.retain(|(pending_id, _)| *pending_id != id);
                debug!("Manual tick {} cancelled", id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let make = {
            let count = Arc::clone(&count);
            move || -> TickCallback {
                let count = Arc::clone(&count);
                Box::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                })
            }
        };
        (count, make)
    }

    #[test]
    fn manual_ticks_fire_on_advance() {
        let scheduler = ManualScheduler::new();
        let (count, make) = counter();

        let _handle = scheduler.schedule(make());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert_eq!(scheduler.advance(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.advance(), 0);
    }

    #[test]
    fn manual_cancel_removes_only_its_tick() {
        let scheduler = ManualScheduler::new();
        let (count, make) = counter();

        let first = scheduler.schedule(make());
        let _second = scheduler.schedule(make());
        first.cancel();

        assert_eq!(scheduler.pending(), 1);
        scheduler.advance();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_tick_fires_after_one_period() {
        let scheduler = TokioScheduler::new(Duration::from_secs(1)).unwrap();
        let (count, make) = counter();

        let _handle = scheduler.schedule(make());
        sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_cancelled_tick_never_fires() {
        let scheduler = TokioScheduler::new(Duration::from_secs(1)).unwrap();
        let (count, make) = counter();

        let handle = scheduler.schedule(make());
        sleep(Duration::from_millis(500)).await;
        handle.cancel();

        sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn tokio_scheduler_requires_a_runtime() {
        let err = TokioScheduler::new(Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, RunnerError::NoRuntime(_)));
    }
}
