//! Distribution summary configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AVERAGE_HORIZON, DEFAULT_CDF_RESOLUTION};

/// Configuration for the CDF and iterated-average curves.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    /// Number of CDF intervals. Default: 1000.
    pub cdf_resolution: Option<usize>,
    /// Exclusive upper bound of `k` for the iterated average. Default: 13.
    pub average_horizon: Option<usize>,
}

impl SummaryConfig {
    pub fn effective_cdf_resolution(&self) -> usize {
        self.cdf_resolution.unwrap_or(DEFAULT_CDF_RESOLUTION)
    }

    pub fn effective_average_horizon(&self) -> usize {
        self.average_horizon.unwrap_or(DEFAULT_AVERAGE_HORIZON)
    }
}
