//! Worker pool errors.

use super::error_code::{self, DivmineErrorCode};

/// Errors raised by the dynamic-refill worker pools.
///
/// None of these are retried: a failed unit of work invalidates the run.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Failed to spawn {pool} worker: {message}")]
    Spawn { pool: String, message: String },

    #[error("{pool} worker for unit {unit} panicked: {message}")]
    WorkerPanicked {
        pool: String,
        unit: usize,
        message: String,
    },

    #[error("{pool} worker for unit {unit} exceeded {timeout_ms}ms")]
    WorkerTimeout {
        pool: String,
        unit: usize,
        timeout_ms: u64,
    },

    #[error("{pool} completion channel disconnected")]
    Disconnected { pool: String },

    #[error("Run cancelled")]
    Cancelled,
}

impl DivmineErrorCode for SchedulerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::WorkerPanicked { .. } => error_code::WORKER_PANIC,
            Self::WorkerTimeout { .. } => error_code::WORKER_TIMEOUT,
            Self::Cancelled => error_code::CANCELLED,
            Self::Spawn { .. } | Self::Disconnected { .. } => error_code::SCHEDULER_ERROR,
        }
    }
}
