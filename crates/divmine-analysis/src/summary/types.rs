//! Curve points. Both serialize as two-element JSON arrays.

use serde::{Deserialize, Serialize};

/// `(threshold, fraction of similarities ≤ threshold)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdfPoint(pub f64, pub f64);

impl CdfPoint {
    pub fn threshold(&self) -> f64 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        self.1
    }
}

/// `(k, running mean of similarity over rows 1..=k)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragePoint(pub usize, pub f64);

impl AveragePoint {
    pub fn k(&self) -> usize {
        self.0
    }

    pub fn mean(&self) -> f64 {
        self.1
    }
}
