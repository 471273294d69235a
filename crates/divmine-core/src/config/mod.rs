//! Configuration system for divmine.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod cover_config;
pub mod divmine_config;
pub mod pairwise_config;
pub mod summary_config;

pub use cover_config::CoverConfig;
pub use divmine_config::{CliOverrides, DivmineConfig};
pub use pairwise_config::PairwiseConfig;
pub use summary_config::SummaryConfig;

use std::time::Duration;

/// Converts a timeout in seconds to a `Duration`, where 0 disables the timeout.
pub(crate) fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
