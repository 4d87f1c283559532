//! Lists the Langford pairings of order 7: arrangements of 1, 1, 2, 2, ...,
//! 7, 7 in a row of 14 slots such that the two copies of `i` have exactly
//! `i` numbers between them.
//!
//! The numbers and the slots are the columns. Number `i` placed in slots `j`
//! and `k = i + j + 1` is a row occupying column `i` and the columns of both
//! slots; see Section 7.2.2.1 of [_The Art of Computer Programming_ 4B][taocp4b].
//!
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4

use exact_cover_links::Store;
use std::ops::ControlFlow;

/// Pairings exist only for orders congruent to 0 or 3 modulo 4.
const N: usize = 7;

/// Column `i` stands for the number `i`, and column `N + j` for slot `j`.
fn slot_column(j: usize) -> usize {
    N + j
}

fn main() -> exact_cover_links::Result<()> {
    tracing_subscriber::fmt::init();

    // Each row places number `i` into slots `j` and `k`.
    let mut placements = Vec::new();
    for i in 1..=N {
        // Every pairing reversed is another pairing; keep the one whose
        // first 1 sits in a slot below `N`.
        let first_slot_range = 1..if i == 1 { N } else { 2 * N - i };
        for j in first_slot_range {
            placements.push((i, j, i + j + 1));
        }
    }
    let rows: Vec<[usize; 3]> = placements
        .iter()
        .map(|&(i, j, k)| [i, slot_column(j), slot_column(k)])
        .collect();
    let mut store = Store::from_rows(3 * N, &rows)?;

    let _ = store.search(|solution| {
        assert_eq!(solution.len(), N);
        let mut sequence = [0usize; 2 * N];
        for row in solution.rows() {
            let (i, j, k) = placements[row - 1];
            sequence[j - 1] = i;
            sequence[k - 1] = i;
        }
        // Print the Langford sequence, and its reverse.
        println!("{:?}", sequence);
        sequence.reverse();
        println!("{:?}", sequence);
        ControlFlow::Continue(())
    });
    assert_eq!(store.solution_count(), 26);
    Ok(())
}
