//! Running average of similarity as more patterns are considered.

use divmine_core::errors::SummaryError;

use super::types::AveragePoint;
use crate::similarity::PairwiseTable;

/// For `k = 1..max_k`, the mean similarity over every pair `(i, j)` with
/// `1 ≤ i ≤ k`, `j < i` present in `table`.
///
/// Missing pairs are skipped, not zero-filled. Fails with
/// [`SummaryError::NoPairs`] if no pair has been seen by some `k`.
pub fn to_iterated_average(
    table: &PairwiseTable,
    max_k: usize,
) -> Result<Vec<AveragePoint>, SummaryError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut curve = Vec::with_capacity(max_k.saturating_sub(1));
    for k in 1..max_k {
        for (_, similarity) in table.row(k) {
            sum += similarity;
            count += 1;
        }
        if count == 0 {
            return Err(SummaryError::NoPairs { k });
        }
        curve.push(AveragePoint(k, sum / count as f64));
    }
    Ok(curve)
}
