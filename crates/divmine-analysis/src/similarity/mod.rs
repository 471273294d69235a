//! Pairwise Jaccard diversity across pattern coverage sets.

pub mod jaccard;
pub mod pairwise;
pub mod table;

pub use jaccard::jaccard_percent;
pub use pairwise::{PairwiseEngine, PairwiseOutcome, PairwiseSettings};
pub use table::{PairKey, PairwiseTable};
