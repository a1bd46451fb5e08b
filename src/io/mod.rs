use std::fmt::Display;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{MAX_ARRAY_SIZE, MAX_VALUE, MIN_ARRAY_SIZE, MIN_VALUE};

/// RNG for array generation, reproducible when `seed` is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Random array with a length in `[MIN_ARRAY_SIZE, MAX_ARRAY_SIZE]` and
/// values in `[MIN_VALUE, MAX_VALUE]`.
pub fn generate_array<R: Rng>(rng: &mut R) -> Vec<i32> {
    let len = rng.random_range(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE);
    (0..len)
        .map(|_| rng.random_range(MIN_VALUE..=MAX_VALUE))
        .collect()
}

/// Render the first `limit` items as `[a, b, c...]`.
pub fn preview<T: Display>(items: impl IntoIterator<Item = T>, limit: usize) -> String {
    let shown: Vec<String> = items
        .into_iter()
        .take(limit)
        .map(|item| item.to_string())
        .collect();
    format!("[{}...]", shown.join(", "))
}
