//! Cover batch scheduler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COVER_BATCH_SIZE, DEFAULT_COVER_POOL_CAPACITY, DEFAULT_WORKER_TIMEOUT_SECS,
};

/// Configuration for coverage computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CoverConfig {
    /// Patterns per unit of work. Default: 100.
    pub batch_size: Option<usize>,
    /// Concurrent cover workers. Default: 5.
    pub pool_capacity: Option<usize>,
    /// Per-worker timeout in seconds, 0 disables. Default: 3600.
    pub worker_timeout_secs: Option<u64>,
}

impl CoverConfig {
    /// Returns the effective batch size, defaulting to 100.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_COVER_BATCH_SIZE)
    }

    /// Returns the effective pool capacity, defaulting to 5.
    pub fn effective_pool_capacity(&self) -> usize {
        self.pool_capacity.unwrap_or(DEFAULT_COVER_POOL_CAPACITY)
    }

    /// Returns the effective worker timeout; `None` means wait forever.
    pub fn effective_worker_timeout(&self) -> Option<Duration> {
        super::timeout_from_secs(self.worker_timeout_secs.unwrap_or(DEFAULT_WORKER_TIMEOUT_SECS))
    }
}
