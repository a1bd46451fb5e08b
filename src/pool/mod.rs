//! Fixed-size worker pool on top of a dedicated rayon thread pool.
//!
//! Each submission gets a [`TaskHandle`] backed by a one-slot channel. Tasks
//! are queued FIFO and run on `pair-worker-{i}` threads. Shutdown drops the
//! rayon pool, which lets queued and running jobs drain before the threads
//! exit; the exit handler reports each exit so [`WorkerPool::await_termination`]
//! can wait for quiescence with a deadline.

mod handle;
mod signal;

pub use handle::TaskHandle;
pub use signal::{CancelToken, Interrupt};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver};

use crate::error::{PoolError, TaskError};
use handle::TaskState;

pub struct WorkerPool {
    inner: Option<rayon::ThreadPool>,
    workers: usize,
    exits: Receiver<usize>,
    exited: usize,
    forced: Arc<AtomicBool>,
    next_id: AtomicUsize,
}

impl WorkerPool {
    /// Start a pool of exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self, PoolError> {
        let (exit_tx, exits) = crossbeam_channel::unbounded();

        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pair-worker-{i}"))
            .exit_handler(move |i| {
                let _ = exit_tx.send(i);
            })
            .build()?;

        tracing::debug!("worker pool started with {workers} threads");

        Ok(Self {
            inner: Some(inner),
            workers,
            exits,
            exited: 0,
            forced: Arc::new(AtomicBool::new(false)),
            next_id: AtomicUsize::new(0),
        })
    }

    /// Queue `task` without blocking and return a handle to its outcome.
    ///
    /// A panic inside `task` is caught and reported as
    /// [`TaskError::Panicked`] on the handle.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Shutdown`] once shutdown has been requested.
    pub fn submit<T, F>(&self, task: F) -> Result<TaskHandle<T>, PoolError>
    where
        T: Send + 'static,
        F: FnOnce(&CancelToken) -> Result<T, TaskError> + Send + 'static,
    {
        let pool = self.inner.as_ref().ok_or(PoolError::Shutdown)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = crossbeam_channel::bounded(1);
        let state = Arc::new(TaskState::default());
        let token = CancelToken::linked(state.cancel_flag(), Arc::clone(&self.forced));

        let worker_state = Arc::clone(&state);
        pool.spawn_fifo(move || {
            if token.is_cancelled() {
                worker_state.cancel();
                tracing::trace!("task {id} skipped, cancelled before start");
                return;
            }
            if !worker_state.start() {
                return;
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(&token)))
                .unwrap_or_else(|payload| Err(TaskError::from_panic(payload)));

            if worker_state.finish() {
                let _ = tx.send(outcome);
            } else {
                tracing::trace!("task {id} cancelled while running, outcome discarded");
            }
        });

        Ok(TaskHandle::new(id, state, rx))
    }

    /// Stop accepting tasks and let queued and running work drain.
    pub fn shutdown(&mut self) {
        if let Some(pool) = self.inner.take() {
            tracing::debug!("refusing new tasks, draining worker pool");
            drop(pool);
        }
    }

    /// Shut down and cancel everything still queued or running. Queued
    /// tasks are skipped; running tasks see it through their token.
    pub fn shutdown_now(&mut self) {
        self.forced.store(true, Ordering::Release);
        self.shutdown();
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.is_none()
    }

    /// True once every worker thread has exited.
    pub fn is_terminated(&self) -> bool {
        self.exited >= self.workers
    }

    /// Wait up to `timeout` for every worker thread to exit.
    ///
    /// Returns `Ok(false)` when the deadline passes first. Only meaningful
    /// after [`shutdown`](Self::shutdown); a live pool never terminates.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Interrupted`] if `interrupt` is raised first.
    pub fn await_termination(
        &mut self,
        timeout: Duration,
        interrupt: &Interrupt,
    ) -> Result<bool, PoolError> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(at) => crossbeam_channel::at(at),
            None => crossbeam_channel::never(),
        };

        while !self.is_terminated() {
            select! {
                recv(self.exits) -> msg => match msg {
                    Ok(worker) => {
                        tracing::trace!("worker {worker} exited");
                        self.exited += 1;
                    }
                    // Every exit handler is gone with the registry.
                    Err(_) => self.exited = self.workers,
                },
                recv(interrupt.signal()) -> _ => return Err(PoolError::Interrupted),
                recv(deadline) -> _ => return Ok(false),
            }
        }

        Ok(true)
    }
}
