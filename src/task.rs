use std::collections::HashSet;

use crate::error::TaskError;
use crate::partition::Chunk;
use crate::pool::CancelToken;

pub type ProductSet = HashSet<i32>;

/// Products of the disjoint adjacent pairs `(0,1)`, `(2,3)`, ... of `values`.
/// A trailing unpaired element is ignored.
pub fn pair_products(values: &[i32]) -> ProductSet {
    values.chunks_exact(2).map(|pair| pair[0] * pair[1]).collect()
}

/// Computes the pair products of one chunk on a worker.
#[derive(Debug, Clone)]
pub struct PairProductTask {
    chunk: Chunk,
}

impl PairProductTask {
    pub fn new(chunk: Chunk) -> Self {
        Self { chunk }
    }

    /// Run the task, stopping early if `token` is cancelled.
    pub fn run(self, token: &CancelToken) -> Result<ProductSet, TaskError> {
        let span = tracing::info_span!(
            "chunk",
            index = self.chunk.index,
            offset = self.chunk.offset
        );
        let _enter = span.enter();

        tracing::info!("started processing {} elements", self.chunk.len());

        let mut products = ProductSet::with_capacity(self.chunk.len() / 2);
        for pair in self.chunk.values.chunks_exact(2) {
            if token.is_cancelled() {
                tracing::debug!("cancelled after {} products", products.len());
                return Err(TaskError::Cancelled);
            }
            products.insert(pair[0] * pair[1]);
        }

        tracing::info!("finished, found {} unique products", products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(values: &[i32]) -> Chunk {
        Chunk {
            index: 0,
            offset: 0,
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_pair_products() {
        assert_eq!(pair_products(&[2, 3, 4, 5]), ProductSet::from([6, 20]));
        assert_eq!(pair_products(&[2, 3, 4]), ProductSet::from([6]));
        assert!(pair_products(&[7]).is_empty());
        assert!(pair_products(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_products_collapse() {
        // (2,3), (1,6) and (3,2) all give 6
        assert_eq!(pair_products(&[2, 3, 1, 6, 3, 2]), ProductSet::from([6]));
    }

    #[test]
    fn test_result_size_bound() {
        let values: Vec<i32> = (0..=100).rev().collect();
        for len in 0..values.len() {
            let products = pair_products(&values[..len]);
            assert!(products.len() <= len / 2);
            for p in &products {
                assert!(values[..len]
                    .chunks_exact(2)
                    .any(|pair| pair[0] * pair[1] == *p));
            }
        }
    }

    #[test]
    fn test_task_run() {
        let token = CancelToken::new();
        let task = PairProductTask::new(chunk(&[2, 3, 4, 5, 9]));
        assert_eq!(task.run(&token), Ok(ProductSet::from([6, 20])));
    }

    #[test]
    fn test_cancelled_task_discards_partial_set() {
        let token = CancelToken::new();
        token.cancel();
        let task = PairProductTask::new(chunk(&[2, 3, 4, 5]));
        assert_eq!(task.run(&token), Err(TaskError::Cancelled));
    }
}
