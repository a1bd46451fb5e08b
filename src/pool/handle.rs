use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use crossbeam_channel::{select, Receiver, TryRecvError};

use super::signal::Interrupt;
use crate::error::TaskError;

const QUEUED: u8 = 0;
const RUNNING: u8 = 1;
const FINISHED: u8 = 2;
const CANCELLED: u8 = 3;

/// Lifecycle of one submitted task, shared by its handle and its worker.
///
/// `QUEUED -> RUNNING -> FINISHED`, with `CANCELLED` reachable from either
/// of the first two. `FINISHED` and `CANCELLED` are terminal.
#[derive(Debug, Default)]
pub(crate) struct TaskState {
    status: AtomicU8,
    cancel_requested: Arc<AtomicBool>,
}

impl TaskState {
    pub(crate) fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_requested)
    }

    /// Claim the task for a worker. Fails if it was cancelled while queued.
    pub(crate) fn start(&self) -> bool {
        self.transition(QUEUED, RUNNING)
    }

    /// Publish completion. Fails if it was cancelled while running.
    pub(crate) fn finish(&self) -> bool {
        self.transition(RUNNING, FINISHED)
    }

    pub(crate) fn cancel(&self) -> bool {
        loop {
            let current = self.status.load(Ordering::Acquire);
            if current == FINISHED || current == CANCELLED {
                return false;
            }
            if self.transition(current, CANCELLED) {
                self.cancel_requested.store(true, Ordering::Release);
                return true;
            }
        }
    }

    fn transition(&self, from: u8, to: u8) -> bool {
        self.status
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn load(&self) -> u8 {
        self.status.load(Ordering::Acquire)
    }
}

/// Handle to one task submitted to a [`WorkerPool`](super::WorkerPool).
#[derive(Debug)]
pub struct TaskHandle<T> {
    id: usize,
    state: Arc<TaskState>,
    outcome: Receiver<Result<T, TaskError>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(
        id: usize,
        state: Arc<TaskState>,
        outcome: Receiver<Result<T, TaskError>>,
    ) -> Self {
        Self { id, state, outcome }
    }

    /// Submission sequence number within the pool.
    pub fn id(&self) -> usize {
        self.id
    }

    /// True once the task finished, failed, or was cancelled.
    pub fn is_done(&self) -> bool {
        matches!(self.state.load(), FINISHED | CANCELLED)
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load() == CANCELLED
    }

    /// Request cancellation. Returns `true` only if this call cancelled the
    /// task; a finished or already cancelled task is left untouched.
    pub fn cancel(&self) -> bool {
        self.state.cancel()
    }

    /// Block until the task resolves or `interrupt` is raised.
    ///
    /// A cancelled handle returns [`TaskError::Cancelled`] at once, even if
    /// its worker is still running. An outcome that is already available
    /// wins over a raised interrupt.
    /// An interrupted wait does not consume the outcome, so a later call can
    /// still collect it.
    pub fn wait(&self, interrupt: &Interrupt) -> Result<T, TaskError> {
        // A cancelled task can never publish, so don't wait for its worker.
        if self.is_cancelled() {
            return Err(TaskError::Cancelled);
        }

        match self.outcome.try_recv() {
            Ok(outcome) => return outcome,
            Err(TryRecvError::Disconnected) => return Err(self.closed_reason()),
            // Finished but not yet sent; the outcome is on its way.
            Err(TryRecvError::Empty) if self.state.load() == FINISHED => {
                return self.outcome.recv().unwrap_or_else(|_| Err(self.closed_reason()));
            }
            Err(TryRecvError::Empty) => {}
        }

        select! {
            recv(self.outcome) -> msg => match msg {
                Ok(outcome) => outcome,
                Err(_) => Err(self.closed_reason()),
            },
            recv(interrupt.signal()) -> _ => Err(TaskError::Interrupted),
        }
    }

    // The worker drops its sender without sending only when the task was
    // cancelled; otherwise the single outcome has already been taken.
    fn closed_reason(&self) -> TaskError {
        if self.is_cancelled() {
            TaskError::Cancelled
        } else {
            TaskError::Consumed
        }
    }
}
