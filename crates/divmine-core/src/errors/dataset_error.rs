//! Dataset and result-file errors.

use super::error_code::{self, DivmineErrorCode};

/// Errors raised while reading or writing dataset, pattern and result files.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Input file is missing: {path}")]
    FileNotFound { path: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed line {line} in {path}: {message}")]
    MalformedLine {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Invalid pair key: {0}")]
    InvalidPairKey(String),

    #[error("JSON error on {path}: {message}")]
    Json { path: String, message: String },
}

impl DivmineErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::MISSING_INPUT,
            _ => error_code::DATASET_ERROR,
        }
    }
}
