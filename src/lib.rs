//! Distinct products of adjacent element pairs, computed over contiguous
//! chunks of an array on a fixed-size worker pool.

pub mod collector;
pub mod config;
pub mod error;
pub mod io;
pub mod lifecycle;
pub mod parallel;
pub mod partition;
pub mod pipeline;
pub mod pool;
pub mod task;
pub mod telemetry;

pub use collector::{collect, ChunkFailure, Collection};
pub use config::RunConfig;
pub use error::{PoolError, TaskError};
pub use lifecycle::ShutdownOutcome;
pub use pipeline::{run, RunReport};
pub use pool::{CancelToken, Interrupt, TaskHandle, WorkerPool};
pub use task::{pair_products, ProductSet};
