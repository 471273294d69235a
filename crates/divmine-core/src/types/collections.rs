//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for pattern items (mined itemsets are usually short).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
