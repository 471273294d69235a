//! Pairwise diversity engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_PAIRWISE_PATTERNS, DEFAULT_PAIRWISE_POOL_CAPACITY, DEFAULT_WORKER_TIMEOUT_SECS,
};

/// Configuration for pairwise Jaccard computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PairwiseConfig {
    /// Concurrent row workers. Default: 4.
    pub pool_capacity: Option<usize>,
    /// Pattern count above which the run is skipped without a limit. Default: 1000.
    pub max_patterns: Option<usize>,
    /// Per-worker timeout in seconds, 0 disables. Default: 3600.
    pub worker_timeout_secs: Option<u64>,
}

impl PairwiseConfig {
    /// Returns the effective pool capacity, defaulting to 4.
    pub fn effective_pool_capacity(&self) -> usize {
        self.pool_capacity.unwrap_or(DEFAULT_PAIRWISE_POOL_CAPACITY)
    }

    /// Returns the effective pattern ceiling, defaulting to 1000.
    pub fn effective_max_patterns(&self) -> usize {
        self.max_patterns.unwrap_or(DEFAULT_MAX_PAIRWISE_PATTERNS)
    }

    /// Returns the effective worker timeout; `None` means wait forever.
    pub fn effective_worker_timeout(&self) -> Option<Duration> {
        super::timeout_from_secs(self.worker_timeout_secs.unwrap_or(DEFAULT_WORKER_TIMEOUT_SECS))
    }
}
