//! Batch scheduler for coverage computation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use divmine_core::config::CoverConfig;
use divmine_core::constants::{
    DEFAULT_COVER_BATCH_SIZE, DEFAULT_COVER_POOL_CAPACITY, DEFAULT_WORKER_TIMEOUT_SECS,
};
use divmine_core::errors::SchedulerError;
use divmine_core::traits::CancellationToken;

use super::index::CoverageIndex;
use super::types::PatternCover;
use crate::dataset::Pattern;
use crate::pool::WorkQueue;

/// Batch size, pool capacity and worker timeout for [`CoverBatchScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSchedulerSettings {
    pub batch_size: usize,
    pub pool_capacity: usize,
    pub worker_timeout: Option<Duration>,
}

impl Default for CoverSchedulerSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_COVER_BATCH_SIZE,
            pool_capacity: DEFAULT_COVER_POOL_CAPACITY,
            worker_timeout: Some(Duration::from_secs(DEFAULT_WORKER_TIMEOUT_SECS)),
        }
    }
}

impl From<&CoverConfig> for CoverSchedulerSettings {
    fn from(config: &CoverConfig) -> Self {
        Self {
            batch_size: config.effective_batch_size(),
            pool_capacity: config.effective_pool_capacity(),
            worker_timeout: config.effective_worker_timeout(),
        }
    }
}

/// Outcome of a cover run.
#[derive(Debug, Clone)]
pub struct CoverReport {
    /// One entry per input pattern, in input order.
    pub covers: Vec<PatternCover>,
    pub batches: usize,
    /// Peak number of concurrently running batch workers.
    pub max_active: usize,
    pub item_scans: usize,
    pub duration: Duration,
}

/// Splits a pattern list into fixed-size batches and computes their
/// coverage on a bounded pool, refilling a slot whenever a batch finishes.
#[derive(Debug, Clone, Default)]
pub struct CoverBatchScheduler {
    settings: CoverSchedulerSettings,
}

impl CoverBatchScheduler {
    pub fn new(settings: CoverSchedulerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CoverSchedulerSettings {
        &self.settings
    }

    /// Half-open, non-overlapping `[begin, end)` ranges covering `0..len`.
    pub fn batch_ranges(&self, len: usize) -> Vec<(usize, usize)> {
        let size = self.settings.batch_size.max(1);
        (0..len)
            .step_by(size)
            .map(|begin| (begin, (begin + size).min(len)))
            .collect()
    }

    /// Compute the coverage of every pattern into `index`'s cache.
    ///
    /// Workers write disjoint pattern keys; duplicate patterns across
    /// batches are coalesced by the cache.
    pub fn compute_all_covers(
        &self,
        index: &CoverageIndex,
        patterns: Arc<Vec<Pattern>>,
        cancel: &CancellationToken,
    ) -> Result<CoverReport, SchedulerError> {
        let start = Instant::now();
        let ranges = self.batch_ranges(patterns.len());
        let batches = ranges.len();

        tracing::info!(
            patterns = patterns.len(),
            transactions = index.dataset().len(),
            batches,
            batch_size = self.settings.batch_size,
            workers = self.settings.pool_capacity,
            "computing pattern covers"
        );

        let queue = WorkQueue::new("covers", self.settings.pool_capacity, self.settings.worker_timeout);
        let worker_index = index.clone();
        let worker_patterns = Arc::clone(&patterns);
        let pool = queue.run(
            ranges,
            move |(begin, end): (usize, usize)| {
                for pattern in &worker_patterns[begin..end] {
                    worker_index.coverage(pattern);
                }
            },
            cancel,
        )?;

        let covers = index.covers_for(&patterns);
        let report = CoverReport {
            covers,
            batches,
            max_active: pool.max_active,
            item_scans: index.item_scans(),
            duration: start.elapsed(),
        };
        tracing::info!(
            batches,
            max_active = report.max_active,
            item_scans = report.item_scans,
            duration_ms = report.duration.as_millis() as u64,
            "pattern covers complete"
        );
        Ok(report)
    }
}
