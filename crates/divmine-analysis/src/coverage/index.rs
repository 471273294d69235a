//! Memoized coverage index over a transactional dataset.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

use super::types::{CoverageSet, PatternCover};
use crate::dataset::{Dataset, Pattern};

/// Computes the set of transactions containing every item of a pattern.
///
/// Per-item and per-pattern coverage share one append-only cache keyed by
/// the item or by the pattern's joined key. Clones share the same cache and
/// dataset, so every worker of a batch run sees the others' entries.
/// `get_with` coalesces concurrent initialisation of a key, giving
/// at-most-once computation per key.
#[derive(Clone)]
pub struct CoverageIndex {
    dataset: Arc<Dataset>,
    cache: Cache<String, Arc<CoverageSet>>,
    item_scans: Arc<AtomicUsize>,
}

impl CoverageIndex {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            // No capacity bound: entries must never be evicted during a run.
            cache: Cache::builder().build(),
            item_scans: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Coverage of `pattern`, computed at most once per pattern key.
    pub fn coverage(&self, pattern: &Pattern) -> Arc<CoverageSet> {
        match pattern.items() {
            [] => self
                .cache
                .get_with(String::new(), || Arc::new(CoverageSet::full(self.dataset.len()))),
            // A single-item pattern shares its key with the item itself.
            [item] => self.item_coverage(item),
            items => {
                let key = pattern.key();
                if let Some(cached) = self.cache.get(&key) {
                    return cached;
                }
                self.cache.get_with(key, || Arc::new(self.intersect_items(items)))
            }
        }
    }

    /// Cached coverage for `pattern`, without computing it.
    pub fn cached(&self, pattern: &Pattern) -> Option<Arc<CoverageSet>> {
        self.cache.get(pattern.key().as_str())
    }

    /// Coverage of every pattern in order, computing any that are missing.
    pub fn covers_for(&self, patterns: &[Pattern]) -> Vec<PatternCover> {
        patterns
            .iter()
            .map(|pattern| PatternCover {
                pattern: pattern.clone(),
                cover: self.cached(pattern).unwrap_or_else(|| self.coverage(pattern)),
            })
            .collect()
    }

    /// Number of full dataset scans performed so far (one per distinct item).
    pub fn item_scans(&self) -> usize {
        self.item_scans.load(Ordering::Relaxed)
    }

    fn item_coverage(&self, item: &str) -> Arc<CoverageSet> {
        if let Some(cached) = self.cache.get(item) {
            return cached;
        }
        self.cache.get_with(item.to_string(), || {
            self.item_scans.fetch_add(1, Ordering::Relaxed);
            let indices = self
                .dataset
                .indexed()
                .filter(|(_, tx)| tx.contains(item))
                .map(|(index, _)| index);
            Arc::new(CoverageSet::from_indices(indices))
        })
    }

    fn intersect_items(&self, items: &[String]) -> CoverageSet {
        let mut per_item: Vec<Arc<CoverageSet>> =
            items.iter().map(|item| self.item_coverage(item)).collect();
        // Smallest first keeps every intermediate result small.
        per_item.sort_by_key(|set| set.len());

        let mut sets = per_item.into_iter();
        let Some(first) = sets.next() else {
            return CoverageSet::full(self.dataset.len());
        };
        let mut acc = CoverageSet::clone(&first);
        for set in sets {
            if acc.is_empty() {
                break;
            }
            acc = acc.intersection(&set);
        }
        acc
    }
}

impl std::fmt::Debug for CoverageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageIndex")
            .field("transactions", &self.dataset.len())
            .field("item_scans", &self.item_scans())
            .finish()
    }
}
