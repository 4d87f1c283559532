//! Property-based tests for the exact cover search.
//!
//! Random small matrices are solved both by the dancing-links search and by
//! enumerating every subset of rows.

mod common;

use common::{brute_force, sorted_covers};
use exact_cover_links::Store;
use proptest::prelude::*;
use std::ops::ControlFlow;

/// A column count and up to ten nonempty rows over those columns.
fn matrix() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (1usize..=6).prop_flat_map(|columns| {
        let row = prop::collection::vec(any::<bool>(), columns).prop_map(|mask| {
            let cols: Vec<usize> = (1..=mask.len()).filter(|&c| mask[c - 1]).collect();
            if cols.is_empty() {
                vec![1]
            } else {
                cols
            }
        });
        (Just(columns), prop::collection::vec(row, 0..=10))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_agrees_with_brute_force((columns, rows) in matrix()) {
        let mut store = Store::from_rows(columns, &rows[..]).unwrap();
        let mut found = sorted_covers(&mut store);
        found.sort();
        let expected = brute_force(columns, &rows);
        prop_assert_eq!(store.solution_count(), expected.len() as u64);
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_sink_calls_match_counter((columns, rows) in matrix()) {
        let mut store = Store::from_rows(columns, &rows[..]).unwrap();
        let mut calls = 0u64;
        let _ = store.search(|_| {
            calls += 1;
            ControlFlow::Continue(())
        });
        prop_assert_eq!(calls, store.solution_count());
    }

    #[test]
    fn prop_search_leaves_store_unchanged((columns, rows) in matrix()) {
        let mut store = Store::from_rows(columns, &rows[..]).unwrap();
        let pristine = store.clone();
        let first = store.solve_all();
        let second = store.solve_all();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(store.solution_count(), 2 * first.len() as u64);

        let mut fresh = pristine.clone();
        prop_assert_eq!(fresh.solve_all(), first);
        prop_assert_eq!(store.active_rows(), pristine.active_rows());
        prop_assert_eq!(store.active_columns(), pristine.active_columns());
    }

    #[test]
    fn prop_abort_restores_store((columns, rows) in matrix(), limit in 1usize..4) {
        let mut store = Store::from_rows(columns, &rows[..]).unwrap();
        let pristine = store.clone();
        let mut found = 0u64;
        let _ = store.search_with(
            |_| {
                found += 1;
                ControlFlow::Continue(())
            },
            |depth| depth > limit,
        );
        prop_assert_eq!(found, store.solution_count());
        let mut restored = store.clone();
        restored.solve_all();
        let mut reference = pristine.clone();
        prop_assert_eq!(restored.solve_all(), reference.solve_all());
    }
}
