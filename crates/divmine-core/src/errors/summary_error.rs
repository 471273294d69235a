//! Distribution aggregation errors.

use super::error_code::{self, DivmineErrorCode};

/// Precondition failures of the CDF and iterated-average aggregations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Cannot build a CDF from zero similarity values")]
    EmptyInput,

    #[error("Similarity value at position {index} is not finite")]
    NonFinite { index: usize },

    #[error("CDF resolution must be greater than 0")]
    InvalidResolution,

    #[error("No pairwise similarity available up to k={k}")]
    NoPairs { k: usize },
}

impl DivmineErrorCode for SummaryError {
    fn error_code(&self) -> &'static str {
        error_code::SUMMARY_ERROR
    }
}
