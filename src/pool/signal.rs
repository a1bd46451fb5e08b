use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

/// Cooperative cancellation flag handed to a running task.
///
/// A token reports cancellation when either its own task was cancelled
/// through its handle or the whole pool was forced down.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    task: Arc<AtomicBool>,
    pool: Arc<AtomicBool>,
}

impl CancelToken {
    /// A standalone token, not attached to any pool.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn linked(task: Arc<AtomicBool>, pool: Arc<AtomicBool>) -> Self {
        Self { task, pool }
    }

    pub fn cancel(&self) {
        self.task.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.load(Ordering::Acquire) || self.pool.load(Ordering::Acquire)
    }
}

/// Sticky external signal that ends blocking waits.
///
/// Raising drops the only sender, which disconnects the signal channel and
/// wakes every `select!` currently watching it. Once raised it stays raised,
/// so the caller can still see it after the pipeline returns.
#[derive(Debug, Clone)]
pub struct Interrupt {
    inner: Arc<InterruptInner>,
}

#[derive(Debug)]
struct InterruptInner {
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl Interrupt {
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(InterruptInner {
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    pub fn raise(&self) {
        if self.inner.trigger.lock().take().is_some() {
            tracing::debug!("interrupt raised");
        }
    }

    pub fn is_raised(&self) -> bool {
        self.inner.trigger.lock().is_none()
    }

    /// Becomes ready (disconnected) once the interrupt is raised.
    pub(crate) fn signal(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}
