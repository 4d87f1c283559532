use crate::indices::ColIndex;
use crate::store::{Frame, Store};
use crate::Solution;
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// The outcome of one query of the row cursor at some level.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum Step {
    /// A new row has been covered at this level.
    Advanced,
    /// No row is left to try at this level; nothing has been covered.
    Exhausted,
}

impl Store {
    /// Returns the active column occupied by the fewest active rows, or
    /// [`None`] if every column has been covered.
    ///
    /// Ties go to the column met first in the header ring, which starts at
    /// the lowest-numbered active column.
    pub fn min_column(&self) -> Option<usize> {
        self.choose_column().map(ColIndex::get)
    }

    fn choose_column(&self) -> Option<ColIndex> {
        if !self.root.columns_linked {
            return None;
        }
        let start = self.root.first_column;
        let mut min_len = u16::MAX;
        let mut min_ix = start;
        let mut cur_ix = start;
        loop {
            let header = self.column(cur_ix);
            if header.len < min_len {
                // A column without rows is surely the result.
                if header.len == 0 {
                    return Some(cur_ix);
                }
                min_len = header.len;
                min_ix = cur_ix;
            }
            cur_ix = header.right;
            if cur_ix == start {
                break;
            }
        }
        Some(min_ix)
    }

    /// Covers the next candidate row at the given level.
    ///
    /// On the first query at a level, picks the branching column and covers
    /// its first row. Later queries expect the previous trial to have been
    /// uncovered; they move down the same column and report
    /// [`Step::Exhausted`], resetting the frame, once the column wraps
    /// around to the first row tried.
    pub(crate) fn advance(&mut self, level: usize) -> Step {
        let frame = self.frames[level];
        let Some(first_row) = frame.first_row else {
            let Some(col) = self.choose_column() else {
                return Step::Exhausted;
            };
            let header = self.column(col);
            if header.len == 0 {
                // A column that no row can cover; backtrack.
                return Step::Exhausted;
            }
            let row = header.first;
            self.frames[level].first_row = Some(row);
            self.cover(row, col, level);
            return Step::Advanced;
        };
        let row = self.cell(frame.row, frame.column).down;
        if row == first_row {
            self.frames[level] = Frame::IDLE;
            Step::Exhausted
        } else {
            self.cover(row, frame.column, level);
            Step::Advanced
        }
    }

    /// Calls a closure on each exact cover of the matrix.
    ///
    /// The closure receives the rows of the cover in the order the search
    /// chose them. The search continues until the closure returns
    /// [`ControlFlow::Break`] or all exact covers have been visited,
    /// whichever occurs first; the result tells which. Either way the store
    /// is left exactly as it was, apart from its
    /// [solution count](Self::solution_count).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::ControlFlow;
    /// use exact_cover_links::Store;
    ///
    /// let mut store = Store::from_rows(2, &[&[1][..], &[2], &[1, 2]])?;
    /// let mut covers = Vec::new();
    /// let flow = store.search(|solution| {
    ///     covers.push(solution.to_vec());
    ///     ControlFlow::Continue(())
    /// });
    /// assert!(flow.is_continue());
    /// assert_eq!(covers, [vec![1, 2], vec![3]]);
    /// # Ok::<(), exact_cover_links::BuildError>(())
    /// ```
    pub fn search<F>(&mut self, visit: F) -> ControlFlow<()>
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
    {
        self.search_with(visit, |_| false)
    }

    /// Like [`search`](Self::search), but consults `abort` with the depth
    /// about to be explored each time the search goes one level deeper,
    /// starting with depth 1. Once `abort` returns `true` the search unwinds,
    /// undoing every pending cover, and returns [`ControlFlow::Break`].
    pub fn search_with<F, A>(&mut self, mut visit: F, mut abort: A) -> ControlFlow<()>
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
        A: FnMut(usize) -> bool,
    {
        debug!(
            rows = self.rows(),
            columns = self.columns(),
            "starting exact cover search"
        );
        let found_before = self.solutions;
        let mut flow = ControlFlow::Continue(());
        let mut level = 1;
        'enter: loop {
            // Enter `level`, whose frame is idle.
            if abort(level) {
                trace!(level, "search aborted");
                flow = ControlFlow::Break(());
            } else if self.is_exact_cover() {
                self.solutions += 1;
                let solution = Solution::new(&self.frames[1..level]);
                trace!(rows = solution.len(), "found exact cover");
                flow = visit(solution);
            } else if self.advance(level) == Step::Advanced {
                level += 1;
                continue;
            }
            // Leave levels until one of them has another row to try.
            loop {
                self.frames[level] = Frame::IDLE;
                level -= 1;
                if level == 0 {
                    break 'enter;
                }
                self.uncover(level);
                if flow.is_continue() && self.advance(level) == Step::Advanced {
                    level += 1;
                    continue 'enter;
                }
            }
        }
        debug!(
            found = self.solutions - found_before,
            aborted = flow.is_break(),
            "exact cover search finished"
        );
        flow
    }

    /// Visits every exact cover and returns copies of their rows.
    pub fn solve_all(&mut self) -> Vec<Vec<usize>> {
        let mut solutions = Vec::new();
        let _ = self.search(|solution| {
            solutions.push(solution.to_vec());
            ControlFlow::Continue(())
        });
        solutions
    }
}
