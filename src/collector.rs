use crate::error::TaskError;
use crate::pool::{Interrupt, TaskHandle};
use crate::task::ProductSet;

/// A chunk whose products are missing from the merged set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    pub index: usize,
    pub error: TaskError,
}

/// Everything the collector gathered from one batch of handles.
#[derive(Debug, Default)]
pub struct Collection {
    pub products: ProductSet,
    /// Handles whose outcome was merged.
    pub merged: usize,
    pub failures: Vec<ChunkFailure>,
    /// Set when any wait was cut short by the interrupt.
    pub interrupted: bool,
}

/// Wait on every handle in submission order and merge the successful
/// outcomes into one set.
///
/// A failed, cancelled, or interrupted handle is reported and skipped; it
/// never stops collection of the handles after it. This is the only writer
/// to the merged set.
pub fn collect(handles: &[TaskHandle<ProductSet>], interrupt: &Interrupt) -> Collection {
    let mut collection = Collection::default();

    for (index, handle) in handles.iter().enumerate() {
        tracing::info!(
            "task {index} status: done={}, cancelled={}",
            handle.is_done(),
            handle.is_cancelled()
        );

        match handle.wait(interrupt) {
            Ok(products) => {
                collection.products.extend(products);
                collection.merged += 1;
            }
            Err(TaskError::Interrupted) => {
                // Interrupt stays raised for the caller.
                tracing::warn!("interrupted while waiting for task {index}");
                collection.interrupted = true;
                collection.failures.push(ChunkFailure {
                    index,
                    error: TaskError::Interrupted,
                });
            }
            Err(error) => {
                tracing::error!("task {index} did not complete: {error}");
                if !handle.is_done() {
                    let cancelled = handle.cancel();
                    tracing::info!("task {index} cancelled: {cancelled}");
                }
                collection.failures.push(ChunkFailure { index, error });
            }
        }
    }

    tracing::debug!(
        "merged {} of {} outcomes into {} unique products",
        collection.merged,
        handles.len(),
        collection.products.len()
    );
    collection
}
