//! Solves the small exact cover problem that D. E. Knuth uses to introduce
//! Algorithm X in the paper "Dancing Links", [arXiv:cs/0011047][dl] [cs.DS]
//! (2000): seven columns and six rows, with the unique cover formed by rows
//! 2, 4 and 6.
//!
//! Run with `RUST_LOG=trace` to watch the search.
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf

use exact_cover_links::Store;
use std::ops::ControlFlow;

fn main() -> exact_cover_links::Result<()> {
    tracing_subscriber::fmt::init();

    let rows: [&[usize]; 6] = [
        &[1, 4, 7],
        &[1, 4],
        &[4, 5, 7],
        &[3, 5, 6],
        &[2, 3, 6, 7],
        &[2, 7],
    ];
    let mut store = Store::from_rows(7, &rows)?;

    let _ = store.search(|solution| {
        // The rows must be copied out; the view dies with this call.
        let cover = solution.to_vec();
        for &row in &cover {
            println!("row {row}: columns {:?}", rows[row - 1]);
        }
        ControlFlow::Continue(())
    });
    println!("{} solution(s)", store.solution_count());
    Ok(())
}
