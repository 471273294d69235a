//! Pairwise diversity engine tests.

use std::sync::Arc;
use std::time::Duration;

use divmine_analysis::coverage::CoverageSet;
use divmine_analysis::similarity::{PairwiseEngine, PairwiseOutcome, PairwiseSettings};
use divmine_core::traits::CancellationToken;

fn engine(pool_capacity: usize, max_patterns: usize) -> PairwiseEngine {
    PairwiseEngine::new(PairwiseSettings {
        pool_capacity,
        max_patterns,
        worker_timeout: Some(Duration::from_secs(30)),
    })
}

fn covers(count: u32) -> Vec<Arc<CoverageSet>> {
    (0..count)
        .map(|i| Arc::new(CoverageSet::from_indices(i..i + 5)))
        .collect()
}

#[test]
fn table_has_every_unordered_pair() {
    let outcome = engine(4, 1000)
        .compute_pairwise(covers(30), None, &CancellationToken::new())
        .unwrap();
    let table = outcome.table().unwrap();
    assert_eq!(table.len(), 30 * 29 / 2);
    for i in 1..30 {
        for j in 0..i {
            assert!(table.get(i, j).is_some(), "missing {i}-{j}");
        }
    }
}

#[test]
fn three_transaction_scenario_similarity() {
    let covers = vec![
        Arc::new(CoverageSet::from_indices([1, 3])),
        Arc::new(CoverageSet::from_indices([1, 2])),
        Arc::new(CoverageSet::from_indices([1])),
    ];
    let table = engine(2, 1000)
        .compute_pairwise(covers, None, &CancellationToken::new())
        .unwrap()
        .into_table()
        .unwrap();
    let ab = table.get(1, 0).unwrap();
    assert!((ab - 33.333333333333336).abs() < 1e-9);
    assert_eq!(table.get(0, 1), Some(ab));
    assert_eq!(table.get(2, 0), Some(50.0));
}

#[test]
fn identical_covers_are_hundred() {
    let covers = vec![
        Arc::new(CoverageSet::from_indices([3, 1, 2])),
        Arc::new(CoverageSet::from_indices([2, 3, 1])),
    ];
    let table = engine(1, 10)
        .compute_pairwise(covers, None, &CancellationToken::new())
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(table.get(1, 0), Some(100.0));
}

#[test]
fn ceiling_skips_without_limit() {
    let outcome = engine(4, 1000)
        .compute_pairwise(covers(1200), None, &CancellationToken::new())
        .unwrap();
    assert_eq!(
        outcome,
        PairwiseOutcome::Skipped {
            pattern_count: 1200,
            ceiling: 1000
        }
    );
    assert!(outcome.table().is_none());
}

#[test]
fn ceiling_is_strict() {
    let outcome = engine(2, 20)
        .compute_pairwise(covers(20), None, &CancellationToken::new())
        .unwrap();
    assert!(!outcome.is_skipped());
}

#[test]
fn limit_overrides_ceiling_and_restricts_rows() {
    let outcome = engine(4, 10)
        .compute_pairwise(covers(50), Some(12), &CancellationToken::new())
        .unwrap();
    let table = outcome.table().unwrap();
    assert_eq!(table.len(), 12 * 11 / 2);
    assert!(table.iter().all(|(k, _)| k.row() < 12));
}

#[test]
fn limit_larger_than_input_uses_all() {
    let table = engine(2, 1)
        .compute_pairwise(covers(5), Some(100), &CancellationToken::new())
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(table.len(), 10);
}

#[test]
fn fewer_than_two_patterns_yield_empty_table() {
    for n in [0, 1] {
        let table = engine(4, 1000)
            .compute_pairwise(covers(n), None, &CancellationToken::new())
            .unwrap()
            .into_table()
            .unwrap();
        assert!(table.is_empty());
    }
}

#[test]
fn empty_covers_have_zero_similarity() {
    let covers = vec![Arc::new(CoverageSet::default()), Arc::new(CoverageSet::default())];
    let table = engine(1, 10)
        .compute_pairwise(covers, None, &CancellationToken::new())
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(table.get(1, 0), Some(0.0));
}

#[test]
fn zero_limit_means_no_restriction() {
    let outcome = engine(2, 100)
        .compute_pairwise(covers(12), Some(0), &CancellationToken::new())
        .unwrap();
    assert_eq!(outcome.table().unwrap().len(), 12 * 11 / 2);

    let capped = engine(2, 10)
        .compute_pairwise(covers(12), Some(0), &CancellationToken::new())
        .unwrap();
    assert!(capped.is_skipped());
}
