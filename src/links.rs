//! The reversible removal of rows and columns from the rings of a [`Store`].
//!
//! Covering a row takes its columns out of the header ring, then removes
//! every row that shares one of those columns from the ring of active rows
//! and from the vertical rings of the columns that are still active. None of
//! these steps touches the links of the node being removed, only those of
//! its neighbors, so [`Store::uncover`] can put everything back by replaying
//! the removals in reverse order.

use crate::indices::{ColIndex, RowIndex};
use crate::store::{Frame, Store};

impl Store {
    /// Removes `row`, every row that conflicts with it and every column it
    /// occupies, recording `(row, col)` in the frame of the given level.
    ///
    /// `col` must be a column occupied by `row`, and `row` must be active.
    /// Each cover must be undone by exactly one [`uncover`](Self::uncover)
    /// at the same level before any shallower level is uncovered.
    pub(crate) fn cover(&mut self, row: RowIndex, col: ColIndex, level: usize) {
        debug_assert!(self.row_header(row).linked(), "covered row must be active");
        let frame = &mut self.frames[level];
        frame.row = row;
        frame.column = col;
        self.cover_sum += u32::from(self.row_header(row).len);

        // Take the columns of `row` out of the header ring.
        let mut j = col;
        loop {
            if self.column(j).linked {
                self.unlink_column(j);
            }
            j = self.cell(row, j).right;
            if j == col {
                break;
            }
        }

        // Remove every row sharing a column with `row`, from top to bottom.
        // The vertical rings of the columns just unlinked stay intact, which
        // is what lets us walk them here and again in `uncover`.
        let mut j = col;
        loop {
            let mut i = row;
            loop {
                if self.row_header(i).linked() {
                    self.unlink_row(i, j);
                }
                let mut k = self.cell(i, j).right;
                while k != j {
                    // A row can share several columns with `row`; only its
                    // first visit may unlink its cells, and cells of
                    // columns that are no longer active stay in place.
                    if (self.column(k).linked || self.row_header(i).linked())
                        && self.cell(i, k).linked
                    {
                        self.unlink_cell(i, k);
                    }
                    k = self.cell(i, k).right;
                }
                i = self.cell(i, j).down;
                if i == row {
                    break;
                }
            }
            j = self.cell(row, j).right;
            if j == col {
                break;
            }
        }
    }

    /// Undoes the [`cover`](Self::cover) recorded in the frame of the given
    /// level, restoring every ring, flag and counter it changed.
    pub(crate) fn uncover(&mut self, level: usize) {
        let Frame { row, column: col, .. } = self.frames[level];

        // Walk the columns of `row` from right to left and each column from
        // bottom to top, so that the removals are undone in reverse order.
        let mut j = self.cell(row, col).left;
        loop {
            let mut i = self.cell(row, j).up;
            loop {
                if self.row_header(i).removed_at == Some(j) {
                    let mut k = self.cell(i, j).left;
                    while k != j {
                        if !self.cell(i, k).linked {
                            self.relink_cell(i, k);
                        }
                        k = self.cell(i, k).left;
                    }
                    self.relink_row(i);
                }
                if i == row {
                    break;
                }
                i = self.cell(i, j).up;
            }
            if j == col {
                break;
            }
            j = self.cell(row, j).left;
        }

        // Put the columns of `row` back into the header ring.
        let mut j = self.cell(row, col).left;
        loop {
            if !self.column(j).linked {
                self.relink_column(j);
            }
            if j == col {
                break;
            }
            j = self.cell(row, j).left;
        }

        self.cover_sum -= u32::from(self.row_header(row).len);
    }

    /// Returns whether the rows chosen so far form an exact cover.
    ///
    /// Chosen rows never overlap, so their lengths add up to the number of
    /// covered columns; the cover is exact once that sum reaches the column
    /// count and no column is left in the header ring.
    pub fn is_exact_cover(&self) -> bool {
        !self.root.columns_linked && self.cover_sum as usize == self.columns.len()
    }

    fn unlink_column(&mut self, j: ColIndex) {
        let (left, right) = (self.column(j).left, self.column(j).right);
        self.column_mut(left).right = right;
        self.column_mut(right).left = left;
        self.column_mut(j).linked = false;
        // Move the boundary pointers of the root off `j`.
        let root = &mut self.root;
        if root.first_column == j && root.last_column == j {
            root.columns_linked = false;
        }
        if root.last_column == j {
            root.last_column = left;
        }
        if root.first_column == j {
            root.first_column = right;
        }
    }

    fn relink_column(&mut self, j: ColIndex) {
        let (left, right) = (self.column(j).left, self.column(j).right);
        self.column_mut(left).right = j;
        self.column_mut(right).left = j;
        self.column_mut(j).linked = true;
        // The ring may have been empty, leaving stale boundaries; the ring
        // is sorted, so the extremes are restored by comparison.
        let root = &mut self.root;
        root.last_column = root.last_column.max(j);
        root.first_column = root.first_column.min(j);
        root.columns_linked = true;
    }

    /// Removes row `i` from the ring of active rows, remembering that the
    /// removal happened while walking column `via`.
    fn unlink_row(&mut self, i: RowIndex, via: ColIndex) {
        let (up, down) = (self.row_header(i).up, self.row_header(i).down);
        self.row_header_mut(down).up = up;
        self.row_header_mut(up).down = down;
        self.row_header_mut(i).removed_at = Some(via);
        let root = &mut self.root;
        if root.first_row == i && root.last_row == i {
            root.rows_linked = false;
        }
        if root.last_row == i {
            root.last_row = up;
        }
        if root.first_row == i {
            root.first_row = down;
        }
    }

    fn relink_row(&mut self, i: RowIndex) {
        let (up, down) = (self.row_header(i).up, self.row_header(i).down);
        self.row_header_mut(up).down = i;
        self.row_header_mut(down).up = i;
        self.row_header_mut(i).removed_at = None;
        let root = &mut self.root;
        root.last_row = root.last_row.max(i);
        root.first_row = root.first_row.min(i);
        root.rows_linked = true;
    }

    /// Removes the cell of row `i` from the vertical ring of column `k`.
    fn unlink_cell(&mut self, i: RowIndex, k: ColIndex) {
        let (up, down) = (self.cell(i, k).up, self.cell(i, k).down);
        self.cell_mut(down, k).up = up;
        self.cell_mut(up, k).down = down;
        let header = self.column_mut(k);
        if header.last == i {
            header.last = up;
        }
        if header.first == i {
            header.first = down;
        }
        header.len -= 1;
        self.cell_mut(i, k).linked = false;
    }

    fn relink_cell(&mut self, i: RowIndex, k: ColIndex) {
        let (up, down) = (self.cell(i, k).up, self.cell(i, k).down);
        self.cell_mut(up, k).down = i;
        self.cell_mut(down, k).up = i;
        let header = self.column_mut(k);
        // An empty ring has stale boundaries equal to `i` itself.
        if header.len == 0 {
            header.first = i;
            header.last = i;
        } else {
            header.last = header.last.max(i);
            header.first = header.first.min(i);
        }
        header.len += 1;
        self.cell_mut(i, k).linked = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canonical() -> Store {
        Store::from_rows(
            7,
            &[
                &[1, 4, 7][..],
                &[1, 4],
                &[4, 5, 7],
                &[3, 5, 6],
                &[2, 3, 6, 7],
                &[2, 7],
            ],
        )
        .unwrap()
    }

    fn row(ix: usize) -> RowIndex {
        RowIndex::new(ix)
    }

    fn col(ix: usize) -> ColIndex {
        ColIndex::new(ix)
    }

    /// Asserts that two stores agree on everything except the scratch frames,
    /// which `cover` writes and `uncover` deliberately leaves in place.
    fn assert_same_links(actual: &Store, expected: &Store) {
        let mut actual = actual.clone();
        actual.frames.clone_from(&expected.frames);
        assert_eq!(&actual, expected);
    }

    #[test]
    fn cover_removes_conflicting_rows_and_columns() {
        let mut store = canonical();
        store.cover(row(1), col(1), 1);
        // Row 1 occupies columns 1, 4 and 7.
        assert_eq!(store.active_columns(), [2, 3, 5, 6]);
        // Rows 2, 3, 5 and 6 share a column with row 1.
        assert_eq!(store.active_rows(), [4]);
        assert_eq!(store.column_len(2), Some(0));
        assert_eq!(store.column_len(3), Some(1));
        assert_eq!(store.column_len(5), Some(1));
        assert_eq!(store.column_len(6), Some(1));
        assert_eq!(store.cover_sum, 3);
        assert_eq!(store.frames[1].row, row(1));
        assert_eq!(store.frames[1].column, col(1));
        assert!(!store.is_exact_cover());
    }

    #[test]
    fn covered_columns_keep_their_vertical_rings() {
        let mut store = canonical();
        store.cover(row(2), col(1), 1);
        // Columns 1 and 4 are covered, but still list the rows removed
        // through them.
        assert_eq!(store.column_len(1), Some(2));
        assert_eq!(store.column_len(4), Some(3));
        assert_eq!(store.cell(row(1), col(4)).down, row(2));
        assert!(store.cell(row(3), col(4)).linked);
        // Row 3's cells in the active columns 5 and 7 are gone.
        assert!(!store.cell(row(3), col(5)).linked);
        assert!(!store.cell(row(3), col(7)).linked);
        assert_eq!(store.column_len(5), Some(1));
        assert_eq!(store.column_len(7), Some(2));
        assert_eq!(store.column(col(7)).first, row(5));
        assert_eq!(store.column(col(7)).last, row(6));
    }

    #[test]
    fn row_sharing_several_columns_is_removed_once() {
        // Row 1 shares columns 1 and 3 with row 2, and both are active when
        // row 2 is covered; row 1's cells must be unlinked exactly once.
        let mut store =
            Store::from_rows(4, &[&[1, 2, 3, 4][..], &[1, 3], &[2], &[2, 4], &[4]]).unwrap();
        let before = store.clone();
        store.cover(row(2), col(1), 1);
        assert_eq!(store.active_columns(), [2, 4]);
        assert_eq!(store.active_rows(), [3, 4, 5]);
        assert_eq!(store.column_len(2), Some(2));
        assert_eq!(store.column_len(4), Some(2));
        assert_eq!(store.row_header(row(1)).removed_at, Some(col(1)));
        store.uncover(1);
        assert_same_links(&store, &before);
    }

    #[test]
    fn cover_then_uncover_restores_every_row() {
        let store = canonical();
        for r in 1..=6 {
            let mut probe = store.clone();
            let first = probe.row_header(row(r)).first;
            probe.cover(row(r), first, 1);
            probe.uncover(1);
            assert_same_links(&probe, &store);
        }
    }

    #[test]
    fn cover_from_any_column_of_the_row_is_restorable() {
        let store = canonical();
        for c in store.row_columns(5) {
            let mut probe = store.clone();
            probe.cover(row(5), col(c), 1);
            assert_eq!(probe.active_columns(), [1, 4, 5]);
            probe.uncover(1);
            assert_same_links(&probe, &store);
        }
    }

    #[test]
    fn nested_covers_unwind_in_reverse() {
        let mut store = canonical();
        let before = store.clone();
        store.cover(row(2), col(1), 1);
        let after_first = store.clone();
        store.cover(row(4), col(5), 2);
        store.cover(row(6), col(2), 3);
        assert!(store.is_exact_cover());
        assert!(!store.root.rows_linked);
        assert!(store.active_columns().is_empty());
        assert_eq!(store.cover_sum, 7);

        store.uncover(3);
        store.uncover(2);
        assert_same_links(&store, &after_first);
        store.uncover(1);
        assert_same_links(&store, &before);
    }

    #[test]
    fn emptied_rings_recover_their_boundaries() {
        // Covering row 1 empties column 2 entirely; covering row 2 at the
        // next level empties the header ring.
        let mut store = Store::from_rows(3, &[&[1][..], &[2, 3], &[1, 2]]).unwrap();
        let before = store.clone();
        store.cover(row(1), col(1), 1);
        assert_eq!(store.column_len(2), Some(1));
        assert_eq!(store.column(col(2)).first, row(2));
        store.cover(row(2), col(2), 2);
        assert!(store.is_exact_cover());
        store.uncover(2);
        store.uncover(1);
        assert_same_links(&store, &before);
        assert_eq!(store.root.first_column, col(1));
        assert_eq!(store.root.last_column, col(3));
    }

    /// Builds a store from random occupancy masks, turning an empty mask
    /// into a row that occupies column 1.
    fn store_from_masks(columns: usize, masks: &[Vec<bool>]) -> Store {
        let rows: Vec<Vec<usize>> = masks
            .iter()
            .map(|mask| {
                let cols: Vec<usize> = (1..=columns).filter(|&c| mask[c - 1]).collect();
                if cols.is_empty() {
                    vec![1]
                } else {
                    cols
                }
            })
            .collect();
        Store::from_rows(columns, &rows).unwrap()
    }

    fn matrix() -> impl Strategy<Value = (usize, Vec<Vec<bool>>)> {
        (1usize..=7).prop_flat_map(|columns| {
            (
                Just(columns),
                prop::collection::vec(prop::collection::vec(any::<bool>(), columns), 0..=10),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_single_cover_is_reversible((columns, masks) in matrix(), pick in any::<prop::sample::Index>()) {
            let store = store_from_masks(columns, &masks);
            prop_assume!(store.rows() > 0);
            let r = pick.index(store.rows()) + 1;
            let cols = store.row_columns(r);
            for c in cols {
                let mut probe = store.clone();
                probe.cover(row(r), col(c), 1);
                probe.uncover(1);
                let mut restored = probe.clone();
                restored.frames.clone_from(&store.frames);
                prop_assert_eq!(&restored, &store);
            }
        }

        #[test]
        fn prop_chains_of_covers_are_reversible((columns, masks) in matrix(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6)) {
            let store = store_from_masks(columns, &masks);
            let mut probe = store.clone();
            let mut level = 0;
            for pick in picks {
                let Some(c) = probe.min_column() else { break };
                let len = probe.column_len(c).unwrap_or(0);
                if len == 0 {
                    break;
                }
                // Walk down to the picked row of the column.
                let c = col(c);
                let mut r = probe.column(c).first;
                for _ in 0..pick.index(len) {
                    r = probe.cell(r, c).down;
                }
                level += 1;
                probe.cover(r, c, level);
                let occupied: usize = probe.active_columns().iter().map(|&c| probe.column_len(c).unwrap()).sum();
                // The counters of the active columns match their rings.
                let linked_cells = probe
                    .cells
                    .iter()
                    .enumerate()
                    .filter(|(ix, cell)| cell.linked && probe.is_column_active(ix % columns + 1))
                    .count();
                prop_assert_eq!(occupied, linked_cells);
            }
            while level > 0 {
                probe.uncover(level);
                level -= 1;
            }
            probe.frames.clone_from(&store.frames);
            prop_assert_eq!(&probe, &store);
        }
    }
}
