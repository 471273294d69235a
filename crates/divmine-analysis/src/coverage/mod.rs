//! Coverage computation: which transactions each pattern covers.
//!
//! [`CoverageIndex`] memoizes per-item and per-pattern coverage in a
//! shared cache; [`CoverBatchScheduler`] fans a pattern list out over the
//! dynamic-refill worker pool in fixed-size batches.

pub mod index;
pub mod scheduler;
pub mod types;

pub use index::CoverageIndex;
pub use scheduler::{CoverBatchScheduler, CoverReport, CoverSchedulerSettings};
pub use types::{CoverageSet, PatternCover};
