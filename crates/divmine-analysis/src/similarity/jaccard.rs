//! Jaccard similarity of coverage sets.

use crate::coverage::CoverageSet;

/// Percentage-scaled Jaccard index.
///
/// J(A, B) = 100 · |A ∩ B| / |A ∪ B|
/// Returns 0.0 if both sets are empty.
pub fn jaccard_percent(a: &CoverageSet, b: &CoverageSet) -> f64 {
    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64 * 100.0
}
