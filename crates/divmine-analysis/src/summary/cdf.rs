//! Empirical CDF of similarity percentages.

use divmine_core::errors::SummaryError;
use rayon::prelude::*;

use super::types::CdfPoint;

/// Sample the CDF of `values` at `resolution + 1` thresholds `100·k/resolution`.
///
/// Sorts once, then advances a cursor that never rewinds:
/// O(n log n + resolution).
pub fn to_cdf(values: &[f64], resolution: usize) -> Result<Vec<CdfPoint>, SummaryError> {
    if values.is_empty() {
        return Err(SummaryError::EmptyInput);
    }
    if resolution == 0 {
        return Err(SummaryError::InvalidResolution);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(SummaryError::NonFinite { index });
    }

    let mut sorted = values.to_vec();
    sorted.par_sort_unstable_by(f64::total_cmp);

    let total = sorted.len() as f64;
    let mut cursor = 0;
    let curve = (0..=resolution)
        .map(|step| {
            let threshold = 100.0 * step as f64 / resolution as f64;
            while cursor < sorted.len() && sorted[cursor] <= threshold {
                cursor += 1;
            }
            CdfPoint(threshold, cursor as f64 / total)
        })
        .collect();
    Ok(curve)
}
