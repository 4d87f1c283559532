//! Counts the tilings of a 6×6 board by 18 dominoes.
//!
//! Each of the 36 squares is a column, and each of the 60 ways to lay a
//! domino on two adjacent squares is a row occupying those two columns. An
//! exact cover is then a tiling. Kasteleyn's formula gives 6728 for this
//! board, which the program checks.

use exact_cover_links::Store;
use smallvec::SmallVec;
use std::ops::ControlFlow;

/// Rows of the board.
const RANKS: usize = 6;

/// Columns of the board.
const FILES: usize = 6;

/// Numbers the cells of the board from 1 in row-major order, so that both
/// cells of a domino come out in ascending order.
fn cell(x: usize, y: usize) -> usize {
    x * FILES + y + 1
}

fn main() -> exact_cover_links::Result<()> {
    tracing_subscriber::fmt::init();

    let mut placements: Vec<SmallVec<usize, 2>> = Vec::new();
    let mut place = |a: usize, b: usize| {
        let mut domino = SmallVec::new();
        domino.push(a);
        domino.push(b);
        placements.push(domino);
    };
    // Horizontal placements first,
    for x0 in 0..RANKS {
        for y0 in 0..FILES - 1 {
            place(cell(x0, y0), cell(x0, y0 + 1));
        }
    }
    // then vertical ones. Transposing the board swaps the two orientations,
    // so the domino on the upper left square may be assumed horizontal.
    for y0 in 0..FILES {
        for x0 in usize::from(y0 == 0)..RANKS - 1 {
            place(cell(x0, y0), cell(x0 + 1, y0));
        }
    }

    let rows: Vec<&[usize]> = placements.iter().map(|domino| domino.as_slice()).collect();
    let mut store = Store::from_rows(RANKS * FILES, &rows)?;

    // Count the number of solutions, taking symmetry into account.
    let mut count = 0;
    let _ = store.search(|solution| {
        debug_assert_eq!(solution.len(), RANKS * FILES / 2);
        count += 2;
        ControlFlow::Continue(())
    });
    println!("{count} tilings");
    assert_eq!(count, 6728);
    Ok(())
}
