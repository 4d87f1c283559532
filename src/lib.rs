//! This crate provides an implementation of D. E. Knuth's Algorithm X on
//! a toroidal matrix of dancing links, for finding all solutions to the
//! exact cover problem.
//!
//! Suppose we're given a 0-1 matrix whose columns are the things to be
//! covered. The _exact cover_ problem is to select a set of rows such that
//! every column contains a 1 in exactly one of the selected rows. Knuth's
//! paper "Dancing Links", [arXiv:cs/0011047][dl] [cs.DS] (2000), represents
//! the 1s of the matrix as nodes of circular doubly linked lists, one ring per
//! row and one per column. A node removed from a ring keeps its own links,
//! so it can be put back by a single pair of assignments; Algorithm X uses
//! this to try every row of a column, recurse on the smaller problem that
//! remains, and restore the matrix on the way back.
//!
//! The [`Store`] keeps the whole matrix in a fixed grid addressed by 16-bit
//! row and column numbers:
//! - [`Store::new`] and [`Store::annex_row`] set up the problem, and report
//!   malformed input as a [`BuildError`].
//! - [`Store::search`] visits every exact cover, always branching on
//!   a column with the fewest remaining rows. [`Store::search_with`] can also
//!   be told to give up early.
//!
//! # Examples
//!
//! Knuth's toy problem from Section 7.2.2.1 of [_The Art of Computer
//! Programming_ **4B** (2022)][taocp4b] has a single solution, formed by
//! rows 2, 4 and 6:
//!
//! ```
//! use std::ops::ControlFlow;
//! use exact_cover_links::Store;
//!
//! let mut store = Store::new(6, 7)?;
//! store.annex_row(1, &[1, 4, 7])?;
//! store.annex_row(2, &[1, 4])?;
//! store.annex_row(3, &[4, 5, 7])?;
//! store.annex_row(4, &[3, 5, 6])?;
//! store.annex_row(5, &[2, 3, 6, 7])?;
//! store.annex_row(6, &[2, 7])?;
//!
//! let flow = store.search(|solution| {
//!     assert_eq!(solution.to_vec(), [2, 4, 6]);
//!     ControlFlow::Continue(())
//! });
//! assert!(flow.is_continue());
//! assert_eq!(store.solution_count(), 1);
//! # Ok::<(), exact_cover_links::BuildError>(())
//! ```
//!
//! The [`demos`] directory contains a few programs that encode puzzles as
//! exact cover problems:
//! - [`canonical.rs`] solves the matrix above and prints the cover.
//! - [`langford_pairs.rs`] finds all [Langford pairings] of the numbers 1 to n, each used twice.
//! - [`domino_chessboard.rs`] counts the ways to tile a board with dominoes.
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4
//! [`demos`]: https://docs.rs/crate/exact-cover-links/latest/source/demos/
//! [`canonical.rs`]: https://docs.rs/crate/exact-cover-links/latest/source/demos/canonical.rs
//! [`langford_pairs.rs`]: https://docs.rs/crate/exact-cover-links/latest/source/demos/langford_pairs.rs
//! [`domino_chessboard.rs`]: https://docs.rs/crate/exact-cover-links/latest/source/demos/domino_chessboard.rs
//! [Langford pairings]: https://en.wikipedia.org/wiki/Langford_pairing

mod error;
mod indices;
mod links;
mod search;
mod store;

pub use error::{BuildError, Result};
pub use indices::MAX_INDEX;
pub use store::Store;

use store::Frame;

/// The rows of an exact cover, as seen by the closure passed to
/// [`Store::search`].
///
/// The view borrows the bookkeeping of the search, which is overwritten as
/// soon as the search backtracks; use [`Solution::to_vec`] to keep a copy.
#[derive(Debug, Clone, Copy)]
pub struct Solution<'s> {
    /// The frames of the levels that chose a row, outermost first.
    frames: &'s [Frame],
}

impl<'s> Solution<'s> {
    pub(crate) fn new(frames: &'s [Frame]) -> Self {
        Self { frames }
    }

    /// Returns the number of rows in the cover.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns whether the cover selects no rows, which happens only for a
    /// matrix without columns.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the rows of the cover in the order the search chose them.
    pub fn rows(&self) -> impl Iterator<Item = usize> + 's {
        self.frames.iter().map(|frame| frame.row.get())
    }

    /// Copies the rows of the cover into a vector.
    pub fn to_vec(&self) -> Vec<usize> {
        self.rows().collect()
    }
}
