use crate::error::PoolError;
use crate::partition::{self, Chunk};
use crate::pool::{TaskHandle, WorkerPool};
use crate::task::{PairProductTask, ProductSet};

/// Splits an array into per-worker chunks and submits one task per chunk.
pub struct ParallelProcessor {
    num_workers: usize,
}

impl ParallelProcessor {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Chunk size used for an array of `len` elements.
    pub fn chunk_size(&self, len: usize) -> usize {
        partition::chunk_size(len, self.num_workers)
    }

    pub fn partition(&self, array: &[i32]) -> Vec<Chunk> {
        partition::partition(array, self.num_workers)
    }

    /// Submit one pair-product task per chunk. Handles come back in chunk
    /// order.
    pub fn dispatch(
        &self,
        pool: &WorkerPool,
        array: &[i32],
    ) -> Result<Vec<TaskHandle<ProductSet>>, PoolError> {
        let chunks = self.partition(array);
        tracing::debug!(
            "dispatching {} chunks of up to {} elements",
            chunks.len(),
            self.chunk_size(array.len())
        );

        chunks
            .into_iter()
            .map(|chunk| {
                let task = PairProductTask::new(chunk);
                pool.submit(move |token| task.run(token))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Interrupt;

    #[test]
    fn test_dispatch_one_handle_per_chunk() {
        let processor = ParallelProcessor::new(4);
        let pool = WorkerPool::new(processor.num_workers()).unwrap();
        let array: Vec<i32> = (1..=10).collect();

        let handles = processor.dispatch(&pool, &array).unwrap();
        assert_eq!(handles.len(), 4);

        // chunks [1,2,3] [4,5,6] [7,8,9] [10]
        let interrupt = Interrupt::new();
        let outcomes: Vec<ProductSet> = handles
            .iter()
            .map(|h| h.wait(&interrupt).unwrap())
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ProductSet::from([2]),
                ProductSet::from([20]),
                ProductSet::from([56]),
                ProductSet::new(),
            ]
        );
    }

    #[test]
    fn test_dispatch_empty_array() {
        let processor = ParallelProcessor::new(2);
        let pool = WorkerPool::new(processor.num_workers()).unwrap();
        assert!(processor.dispatch(&pool, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_dispatch_after_shutdown_fails() {
        let processor = ParallelProcessor::new(2);
        let mut pool = WorkerPool::new(processor.num_workers()).unwrap();
        pool.shutdown();
        assert!(matches!(
            processor.dispatch(&pool, &[1, 2, 3]),
            Err(PoolError::Shutdown)
        ));
    }
}
