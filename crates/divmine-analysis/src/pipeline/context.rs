//! Resolved settings shared by every stage.

use divmine_core::config::{DivmineConfig, SummaryConfig};
use divmine_core::constants::{DEFAULT_AVERAGE_HORIZON, DEFAULT_CDF_RESOLUTION};
use divmine_core::traits::CancellationToken;

use crate::coverage::CoverSchedulerSettings;
use crate::similarity::PairwiseSettings;

/// CDF resolution and iterated-average horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySettings {
    pub cdf_resolution: usize,
    pub average_horizon: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            cdf_resolution: DEFAULT_CDF_RESOLUTION,
            average_horizon: DEFAULT_AVERAGE_HORIZON,
        }
    }
}

impl From<&SummaryConfig> for SummarySettings {
    fn from(config: &SummaryConfig) -> Self {
        Self {
            cdf_resolution: config.effective_cdf_resolution(),
            average_horizon: config.effective_average_horizon(),
        }
    }
}

/// Everything a stage needs besides its file paths.
#[derive(Debug, Clone, Default)]
pub struct StageContext {
    pub covers: CoverSchedulerSettings,
    pub pairwise: PairwiseSettings,
    pub summary: SummarySettings,
    pub cancel: CancellationToken,
}

impl StageContext {
    pub fn from_config(config: &DivmineConfig) -> Self {
        Self {
            covers: (&config.covers).into(),
            pairwise: (&config.pairwise).into(),
            summary: (&config.summary).into(),
            cancel: CancellationToken::new(),
        }
    }
}
