/// A contiguous slice of the source array, owned so it can move onto a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Submission order of this chunk.
    pub index: usize,
    /// Position of the first element in the source array.
    pub offset: usize,
    pub values: Vec<i32>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Chunk size used for an array of `len` elements spread over `workers`.
pub fn chunk_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1))
}

/// Split `array` into at most `workers` contiguous chunks of
/// `ceil(len / workers)` elements, the last one taking the remainder.
pub fn partition(array: &[i32], workers: usize) -> Vec<Chunk> {
    if array.is_empty() {
        return Vec::new();
    }

    let size = chunk_size(array.len(), workers);
    array
        .chunks(size)
        .enumerate()
        .map(|(index, values)| Chunk {
            index,
            offset: index * size,
            values: values.to_vec(),
        })
        .collect()
}
