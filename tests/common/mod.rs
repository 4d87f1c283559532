//! Helpers shared by the integration tests.

// Each test binary uses only some of these helpers.
#![allow(dead_code)]

use exact_cover_links::Store;
use std::ops::ControlFlow;

/// The matrix from Knuth's "Dancing Links" paper.
pub const CANONICAL: [&[usize]; 6] = [
    &[1, 4, 7],
    &[1, 4],
    &[4, 5, 7],
    &[3, 5, 6],
    &[2, 3, 6, 7],
    &[2, 7],
];

pub fn canonical() -> Store {
    Store::from_rows(7, &CANONICAL).unwrap()
}

/// Runs a full search, returning every cover with its rows sorted, in the
/// order the search found them.
pub fn sorted_covers(store: &mut Store) -> Vec<Vec<usize>> {
    let mut covers = Vec::new();
    let flow = store.search(|solution| {
        let mut rows = solution.to_vec();
        rows.sort_unstable();
        covers.push(rows);
        ControlFlow::Continue(())
    });
    assert!(flow.is_continue());
    covers
}

/// Enumerates every subset of rows and keeps those that cover each column
/// exactly once.
pub fn brute_force(columns: usize, rows: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut covers = Vec::new();
    for subset in 0u32..(1 << rows.len()) {
        let mut seen = vec![0u32; columns + 1];
        let mut chosen = Vec::new();
        for (ix, row) in rows.iter().enumerate() {
            if subset & (1 << ix) != 0 {
                chosen.push(ix + 1);
                for &col in row {
                    seen[col] += 1;
                }
            }
        }
        if seen[1..].iter().all(|&count| count == 1) {
            covers.push(chosen);
        }
    }
    covers
}
