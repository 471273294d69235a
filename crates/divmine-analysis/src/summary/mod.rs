//! Distribution summaries of pairwise similarity: empirical CDF and
//! iterated (running) average.

pub mod average;
pub mod cdf;
pub mod types;

pub use average::to_iterated_average;
pub use cdf::to_cdf;
pub use types::{AveragePoint, CdfPoint};
