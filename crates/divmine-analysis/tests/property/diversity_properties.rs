use std::sync::Arc;

use divmine_analysis::coverage::CoverageIndex;
use divmine_analysis::dataset::{Dataset, Pattern, Transaction};
use divmine_analysis::similarity::jaccard_percent;
use divmine_analysis::summary::to_cdf;
use divmine_analysis::CoverageSet;
use proptest::prelude::*;

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(prop::collection::btree_set(0u8..8, 0..6), 1..30).prop_map(|rows| {
        rows.into_iter()
            .map(|items| {
                let line: Vec<String> = items.iter().map(|i| format!("i{i}")).collect();
                Transaction::parse(&line.join(" "))
            })
            .collect()
    })
}

fn cover_strategy() -> impl Strategy<Value = CoverageSet> {
    prop::collection::btree_set(1u32..50, 0..20).prop_map(CoverageSet::from_iter)
}

proptest! {
    #[test]
    fn adding_items_never_grows_coverage(
        ds in dataset_strategy(),
        base in prop::collection::vec(0u8..8, 1..3),
        extra in 0u8..8,
    ) {
        let index = CoverageIndex::new(Arc::new(ds));
        let items: Vec<String> = base.iter().map(|i| format!("i{i}")).collect();
        let mut larger = items.clone();
        larger.push(format!("i{extra}"));

        let small = index.coverage(&Pattern::new(items));
        let big = index.coverage(&Pattern::new(larger));
        prop_assert!(big.is_subset(&small));
    }

    #[test]
    fn item_order_does_not_change_coverage(
        ds in dataset_strategy(),
        a in 0u8..8,
        b in 0u8..8,
    ) {
        let index = CoverageIndex::new(Arc::new(ds));
        let ab = index.coverage(&Pattern::parse(&format!("i{a} i{b}")));
        let ba = index.coverage(&Pattern::parse(&format!("i{b} i{a}")));
        prop_assert_eq!(&*ab, &*ba);
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded(a in cover_strategy(), b in cover_strategy()) {
        let ab = jaccard_percent(&a, &b);
        prop_assert_eq!(ab, jaccard_percent(&b, &a));
        prop_assert!((0.0..=100.0).contains(&ab));
    }

    #[test]
    fn jaccard_self_is_full(a in cover_strategy()) {
        let expected = if a.is_empty() { 0.0 } else { 100.0 };
        prop_assert_eq!(jaccard_percent(&a, &a), expected);
    }

    #[test]
    fn cdf_is_monotone_and_ends_at_one(
        values in prop::collection::vec(0.0f64..=100.0, 1..200),
        resolution in 1usize..300,
    ) {
        let curve = to_cdf(&values, resolution).unwrap();
        prop_assert_eq!(curve.len(), resolution + 1);
        for pair in curve.windows(2) {
            prop_assert!(pair[0].fraction() <= pair[1].fraction());
        }
        prop_assert_eq!(curve[resolution].fraction(), 1.0);
    }
}
