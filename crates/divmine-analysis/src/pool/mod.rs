//! Dynamic-refill worker pool shared by the cover and pairwise stages.

pub mod work_queue;

pub use work_queue::{PoolReport, WorkQueue};
