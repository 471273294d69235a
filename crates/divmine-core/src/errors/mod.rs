//! Error handling for divmine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod dataset_error;
pub mod error_code;
pub mod pipeline_error;
pub mod scheduler_error;
pub mod summary_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use error_code::DivmineErrorCode;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use scheduler_error::SchedulerError;
pub use summary_error::SummaryError;
