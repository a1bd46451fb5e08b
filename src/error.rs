use thiserror::Error;

/// Errors raised by the worker pool itself.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("failed to build worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),

    #[error("worker pool is shut down and no longer accepts tasks")]
    Shutdown,

    #[error("wait for worker pool termination was interrupted")]
    Interrupted,
}

/// Why a submitted task did not produce a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task ran and returned an error.
    #[error("task failed: {message}")]
    Failed { message: String },

    /// The task panicked while running on a worker.
    #[error("task panicked: {message}")]
    Panicked { message: String },

    /// The task was cancelled before it produced an outcome.
    #[error("task was cancelled")]
    Cancelled,

    /// The wait for the task's outcome was interrupted.
    #[error("wait for task outcome was interrupted")]
    Interrupted,

    /// The outcome was already taken by an earlier wait.
    #[error("task outcome was already taken")]
    Consumed,
}

impl TaskError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_message() {
        let err = TaskError::from_panic(Box::new("boom"));
        assert_eq!(
            err,
            TaskError::Panicked {
                message: "boom".to_string()
            }
        );

        let err = TaskError::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(err.to_string(), "task panicked: owned boom");

        let err = TaskError::from_panic(Box::new(42_u8));
        assert_eq!(err.to_string(), "task panicked: unknown panic payload");
    }
}
