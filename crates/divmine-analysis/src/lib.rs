//! # divmine-analysis
//!
//! Diversity statistics over mined itemsets:
//! coverage sets against a transactional dataset, pairwise Jaccard
//! similarity across all patterns, and the CDF / iterated-average
//! summaries of that similarity distribution.
//!
//! Stages: dataset + patterns → [`coverage`] → [`similarity`] → [`summary`].
//! Both parallel stages run on the dynamic-refill pool in [`pool`].

pub mod coverage;
pub mod dataset;
pub mod io;
pub mod pipeline;
pub mod pool;
pub mod similarity;
pub mod summary;

pub use coverage::{CoverBatchScheduler, CoverSchedulerSettings, CoverageIndex, CoverageSet};
pub use dataset::{Dataset, Pattern, Transaction};
pub use similarity::{PairKey, PairwiseEngine, PairwiseOutcome, PairwiseSettings, PairwiseTable};
pub use summary::{to_cdf, to_iterated_average, AveragePoint, CdfPoint};
