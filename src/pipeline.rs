use crate::collector::{self, Collection};
use crate::config::RunConfig;
use crate::error::PoolError;
use crate::lifecycle::{self, ShutdownOutcome};
use crate::parallel::ParallelProcessor;
use crate::pool::{Interrupt, WorkerPool};

/// Result of one partition-dispatch-collect-shutdown run.
#[derive(Debug)]
pub struct RunReport {
    pub workers: usize,
    pub chunks: usize,
    pub collection: Collection,
    pub shutdown: ShutdownOutcome,
}

/// Compute the distinct pair products of `array` on a fresh worker pool.
pub fn run(array: &[i32], config: &RunConfig, interrupt: &Interrupt) -> Result<RunReport, PoolError> {
    let processor = ParallelProcessor::new(config.workers);
    let pool = WorkerPool::new(processor.num_workers())?;

    let handles = processor.dispatch(&pool, array)?;
    let collection = collector::collect(&handles, interrupt);
    let shutdown = lifecycle::shutdown(pool, config.shutdown_timeout, interrupt);

    Ok(RunReport {
        workers: processor.num_workers(),
        chunks: handles.len(),
        collection,
        shutdown,
    })
}
