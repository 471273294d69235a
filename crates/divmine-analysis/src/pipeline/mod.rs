//! One-shot stages chaining readers, the parallel core and writers.
//!
//! - [`cover_stage`]: patterns + dataset → `.sol` result file
//! - [`pairwise_stage`]: `.sol` → `.par` pairwise JSON
//! - [`summarize_folder`]: every `.sol` in a folder → `.par`, CDF and
//!   iterated-average curve files

pub mod context;
pub mod stages;
pub mod summarize;

pub use context::{StageContext, SummarySettings};
pub use stages::{cover_stage, pairwise_stage};
pub use summarize::{summarize_folder, summarize_solution, SolutionSummary, SummaryStatus};
