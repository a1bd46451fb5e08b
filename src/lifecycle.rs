use std::time::Duration;

use crate::pool::{Interrupt, WorkerPool};

/// How the worker pool was wound down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every worker exited within the bound.
    Clean,
    /// The bound passed first and remaining work was cancelled.
    Forced,
    /// The wait was interrupted and remaining work was cancelled.
    Interrupted,
}

/// Shut `pool` down gracefully, waiting up to `timeout` for it to go quiet
/// before forcing cancellation.
///
/// An interrupt during the wait forces cancellation right away; the
/// interrupt is left raised. If the interrupt is already raised while an
/// idle pool drains, either `Clean` or `Interrupted` may be reported.
pub fn shutdown(mut pool: WorkerPool, timeout: Duration, interrupt: &Interrupt) -> ShutdownOutcome {
    pool.shutdown();

    match pool.await_termination(timeout, interrupt) {
        Ok(true) => {
            tracing::debug!("worker pool shut down cleanly");
            ShutdownOutcome::Clean
        }
        Ok(false) => {
            pool.shutdown_now();
            tracing::warn!(
                "worker pool did not terminate within {timeout:?}, forced cancellation of remaining work"
            );
            ShutdownOutcome::Forced
        }
        Err(err) => {
            pool.shutdown_now();
            tracing::warn!("{err}, forced cancellation of remaining work");
            ShutdownOutcome::Interrupted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    // Stalls until cancelled, with a cap so a broken test cannot hang.
    fn stall(pool: &WorkerPool) {
        pool.submit(|token| {
            let started = Instant::now();
            while !token.is_cancelled() && started.elapsed() < Duration::from_secs(10) {
                thread::sleep(Duration::from_millis(2));
            }
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_idle_pool_shuts_down_cleanly() {
        let pool = WorkerPool::new(2).unwrap();
        let outcome = shutdown(pool, Duration::from_secs(10), &Interrupt::new());
        assert_eq!(outcome, ShutdownOutcome::Clean);
    }

    #[test]
    fn test_in_flight_work_finishes_before_clean_shutdown() {
        let pool = WorkerPool::new(2).unwrap();
        let handle = pool
            .submit(|_| {
                thread::sleep(Duration::from_millis(30));
                Ok(1)
            })
            .unwrap();

        let outcome = shutdown(pool, Duration::from_secs(10), &Interrupt::new());
        assert_eq!(outcome, ShutdownOutcome::Clean);
        assert_eq!(handle.wait(&Interrupt::new()), Ok(1));
    }

    #[test]
    fn test_stall_beyond_bound_forces_cancellation() {
        let pool = WorkerPool::new(2).unwrap();
        stall(&pool);

        let started = Instant::now();
        let outcome = shutdown(pool, Duration::from_millis(50), &Interrupt::new());
        assert_eq!(outcome, ShutdownOutcome::Forced);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_raised_interrupt_on_idle_pool_never_forces_by_timeout() {
        for _ in 0..20 {
            let pool = WorkerPool::new(2).unwrap();
            let interrupt = Interrupt::new();
            interrupt.raise();
            let outcome = shutdown(pool, Duration::from_secs(60), &interrupt);
            assert!(matches!(
                outcome,
                ShutdownOutcome::Clean | ShutdownOutcome::Interrupted
            ));
            assert!(interrupt.is_raised());
        }
    }

    #[test]
    fn test_interrupt_forces_cancellation_and_stays_raised() {
        let pool = WorkerPool::new(2).unwrap();
        stall(&pool);

        let interrupt = Interrupt::new();
        interrupt.raise();
        let outcome = shutdown(pool, Duration::from_secs(60), &interrupt);
        assert_eq!(outcome, ShutdownOutcome::Interrupted);
        assert!(interrupt.is_raised());
    }
}
