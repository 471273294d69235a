//! Pairwise diversity engine: Jaccard similarity for every pattern pair.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use divmine_core::config::PairwiseConfig;
use divmine_core::constants::{
    DEFAULT_MAX_PAIRWISE_PATTERNS, DEFAULT_PAIRWISE_POOL_CAPACITY, DEFAULT_WORKER_TIMEOUT_SECS,
};
use divmine_core::errors::SchedulerError;
use divmine_core::traits::CancellationToken;

use super::jaccard::jaccard_percent;
use super::table::{PairKey, PairwiseTable};
use crate::coverage::CoverageSet;
use crate::pool::WorkQueue;

/// Pool capacity, pattern ceiling and worker timeout for [`PairwiseEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseSettings {
    pub pool_capacity: usize,
    pub max_patterns: usize,
    pub worker_timeout: Option<Duration>,
}

impl Default for PairwiseSettings {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_PAIRWISE_POOL_CAPACITY,
            max_patterns: DEFAULT_MAX_PAIRWISE_PATTERNS,
            worker_timeout: Some(Duration::from_secs(DEFAULT_WORKER_TIMEOUT_SECS)),
        }
    }
}

impl From<&PairwiseConfig> for PairwiseSettings {
    fn from(config: &PairwiseConfig) -> Self {
        Self {
            pool_capacity: config.effective_pool_capacity(),
            max_patterns: config.effective_max_patterns(),
            worker_timeout: config.effective_worker_timeout(),
        }
    }
}

/// Result of a pairwise run.
#[derive(Debug, Clone, PartialEq)]
pub enum PairwiseOutcome {
    Computed(PairwiseTable),
    /// Too many patterns and no limit: nothing was computed.
    Skipped { pattern_count: usize, ceiling: usize },
}

impl PairwiseOutcome {
    pub fn table(&self) -> Option<&PairwiseTable> {
        match self {
            Self::Computed(table) => Some(table),
            Self::Skipped { .. } => None,
        }
    }

    pub fn into_table(self) -> Option<PairwiseTable> {
        match self {
            Self::Computed(table) => Some(table),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Computes `similarity(i, j)` for every `j < i`, one row per work unit.
#[derive(Debug, Clone, Default)]
pub struct PairwiseEngine {
    settings: PairwiseSettings,
}

impl PairwiseEngine {
    pub fn new(settings: PairwiseSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PairwiseSettings {
        &self.settings
    }

    /// Pairwise Jaccard percentages across `covers`.
    ///
    /// Without `limit`, more than `max_patterns` covers yields
    /// [`PairwiseOutcome::Skipped`]. With `limit`, only the first `limit`
    /// patterns are compared and the ceiling is not checked. `Some(0)` is
    /// treated as no limit.
    pub fn compute_pairwise(
        &self,
        covers: Vec<Arc<CoverageSet>>,
        limit: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<PairwiseOutcome, SchedulerError> {
        let pattern_count = covers.len();
        // A zero limit means no restriction.
        let limit = limit.filter(|&l| l > 0);
        if limit.is_none() && pattern_count > self.settings.max_patterns {
            tracing::warn!(
                pattern_count,
                ceiling = self.settings.max_patterns,
                "too many patterns for pairwise comparison, skipping"
            );
            return Ok(PairwiseOutcome::Skipped {
                pattern_count,
                ceiling: self.settings.max_patterns,
            });
        }

        let considered = limit.map_or(pattern_count, |l| l.min(pattern_count));
        let start = Instant::now();
        tracing::info!(
            pattern_count,
            considered,
            workers = self.settings.pool_capacity,
            "computing pairwise similarities"
        );

        // Row 0 has no pairs.
        let rows: Vec<usize> = (1..considered).collect();
        let covers = Arc::new(covers);
        // Rows write disjoint keys.
        let shared: Arc<DashMap<PairKey, f64>> = Arc::new(DashMap::new());

        let queue = WorkQueue::new(
            "pairwise",
            self.settings.pool_capacity,
            self.settings.worker_timeout,
        );
        let worker_covers = Arc::clone(&covers);
        let worker_table = Arc::clone(&shared);
        let pool = queue.run(
            rows,
            move |row: usize| {
                for (key, similarity) in similarity_row(&worker_covers, row) {
                    worker_table.insert(key, similarity);
                }
            },
            cancel,
        )?;

        let table: PairwiseTable = match Arc::try_unwrap(shared) {
            Ok(map) => map.into_iter().collect(),
            Err(shared) => shared.iter().map(|e| (*e.key(), *e.value())).collect(),
        };
        tracing::info!(
            pairs = table.len(),
            max_active = pool.max_active,
            duration_ms = start.elapsed().as_millis() as u64,
            "pairwise similarities complete"
        );
        Ok(PairwiseOutcome::Computed(table))
    }
}

/// `similarity(row, j)` for every `j < row`.
fn similarity_row(covers: &[Arc<CoverageSet>], row: usize) -> Vec<(PairKey, f64)> {
    let current = &covers[row];
    covers[..row]
        .iter()
        .enumerate()
        .filter_map(|(col, other)| {
            PairKey::new(row, col).map(|key| (key, jaccard_percent(current, other)))
        })
        .collect()
}
