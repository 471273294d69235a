//! Pipeline errors and non-fatal error collection.

use super::error_code::DivmineErrorCode;
use super::{ConfigError, DatasetError, SchedulerError, SummaryError};

/// Errors that can occur while running a stage.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),
}

impl DivmineErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Dataset(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Scheduler(e) => e.error_code(),
            Self::Summary(e) => e.error_code(),
        }
    }
}

/// Result of a multi-file run that accumulates non-fatal errors.
/// Allows the remaining files to be processed when one of them fails.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run, with the file they belong to.
    pub errors: Vec<(String, PipelineError)>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Record a non-fatal error for `source`.
    pub fn add_error(&mut self, source: impl Into<String>, error: PipelineError) {
        self.errors.push((source.into(), error));
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
