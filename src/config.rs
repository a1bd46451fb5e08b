use std::time::Duration;

pub const MIN_ARRAY_SIZE: usize = 40;
pub const MAX_ARRAY_SIZE: usize = 60;
pub const MIN_VALUE: i32 = 0;
pub const MAX_VALUE: i32 = 100;

/// How many leading elements the console previews show.
pub const PREVIEW_LEN: usize = 10;

/// The pool never runs with fewer workers than this.
pub const MIN_WORKERS: usize = 2;

pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: usize,
    pub shutdown_timeout: Duration,
}

impl RunConfig {
    /// Build a config, resolving the worker count once.
    pub fn new(requested_workers: Option<usize>, shutdown_timeout: Duration) -> Self {
        Self {
            workers: worker_count(requested_workers),
            shutdown_timeout,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_SHUTDOWN_TIMEOUT)
    }
}

/// Worker count for the pool: the requested count or the detected
/// parallelism, never below [`MIN_WORKERS`].
pub fn worker_count(requested: Option<usize>) -> usize {
    requested.unwrap_or_else(num_cpus::get).max(MIN_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_floor() {
        assert_eq!(worker_count(Some(0)), MIN_WORKERS);
        assert_eq!(worker_count(Some(1)), MIN_WORKERS);
        assert_eq!(worker_count(Some(6)), 6);
        assert!(worker_count(None) >= MIN_WORKERS);
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(config.workers >= MIN_WORKERS);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(60));
    }
}
