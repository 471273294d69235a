//! DivmineErrorCode trait for user-facing diagnostics.

/// Stable error code attached to every divmine error enum.
pub trait DivmineErrorCode {
    /// Returns the error code string (e.g., "DATASET_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_INPUT: &str = "MISSING_INPUT";
pub const DATASET_ERROR: &str = "DATASET_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCHEDULER_ERROR: &str = "SCHEDULER_ERROR";
pub const WORKER_PANIC: &str = "WORKER_PANIC";
pub const WORKER_TIMEOUT: &str = "WORKER_TIMEOUT";
pub const CANCELLED: &str = "CANCELLED";
pub const SUMMARY_ERROR: &str = "SUMMARY_ERROR";
