use crate::error::{BuildError, Result};
use crate::indices::{ColIndex, RowIndex, MAX_INDEX};
use tracing::{debug, trace};

/// The master node at the intersection of the header row and the header
/// column. It does not belong to any ring; instead it keeps boundary
/// pointers into the ring of active columns and the ring of active rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Root {
    /// The lowest-numbered active column, where column scans begin.
    ///
    /// The value is stale while `columns_linked` is false.
    pub(crate) first_column: ColIndex,
    /// The highest-numbered active column.
    pub(crate) last_column: ColIndex,
    /// Whether the ring of active columns is nonempty.
    pub(crate) columns_linked: bool,
    /// The lowest-numbered active row.
    pub(crate) first_row: RowIndex,
    /// The highest-numbered active row. Outside a search this is also the
    /// last row annexed, which is what keeps rows in ascending order.
    pub(crate) last_row: RowIndex,
    /// Whether the ring of active rows is nonempty.
    pub(crate) rows_linked: bool,
}

/// A cell of the header row. The active column headers form a horizontal
/// ring in ascending order; each header also points at the first and last
/// rows of its vertical ring.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct ColumnHeader {
    /// The previous active column, in cyclic order. Preserved while the
    /// column is unlinked so that it can be put back.
    pub(crate) left: ColIndex,
    /// The next active column, in cyclic order.
    pub(crate) right: ColIndex,
    /// The lowest-numbered row in the vertical ring of this column; stale
    /// if `len` is zero.
    pub(crate) first: RowIndex,
    /// The highest-numbered row in the vertical ring of this column.
    pub(crate) last: RowIndex,
    /// The number of rows in the vertical ring, which the column selector
    /// minimizes.
    pub(crate) len: u16,
    /// Whether the column is still waiting to be covered.
    pub(crate) linked: bool,
}

/// A cell of the header column. The active row headers form a vertical ring
/// in ascending order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct RowHeader {
    /// The previous active row, in cyclic order.
    pub(crate) up: RowIndex,
    /// The next active row, in cyclic order.
    pub(crate) down: RowIndex,
    /// The first column the row occupies; an entry point into its
    /// horizontal ring.
    pub(crate) first: ColIndex,
    /// The number of columns the row occupies. This never changes once the
    /// row is annexed; it feeds the running cover sum.
    pub(crate) len: u16,
    pub(crate) annexed: bool,
    /// The column through which the row was removed by the pending cover,
    /// or [`None`] if the row is linked. Uncover restores the row at exactly
    /// that visit.
    pub(crate) removed_at: Option<ColIndex>,
}

impl RowHeader {
    pub(crate) fn linked(&self) -> bool {
        self.removed_at.is_none()
    }
}

/// A data node of the grid, at the intersection of an occupied column and
/// a row. Cells that no row occupies are never linked to anything.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub(crate) struct Cell {
    /// The previous occupied column of this row, in cyclic order.
    pub(crate) left: ColIndex,
    /// The next occupied column of this row, in cyclic order.
    pub(crate) right: ColIndex,
    /// The previous active row in this column, in cyclic order. Preserved
    /// while the cell is unlinked.
    pub(crate) up: RowIndex,
    /// The next active row in this column, in cyclic order.
    pub(crate) down: RowIndex,
    pub(crate) linked: bool,
}

/// The bookkeeping of one level of the search: which row was tried for
/// which column, and the row the trials started from.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Frame {
    pub(crate) row: RowIndex,
    pub(crate) column: ColIndex,
    /// The first row tried at this level, or [`None`] if the level has not
    /// started iterating over a column.
    pub(crate) first_row: Option<RowIndex>,
}

impl Frame {
    pub(crate) const IDLE: Self = Self {
        row: RowIndex::HEADER,
        column: ColIndex::HEADER,
        first_row: None,
    };
}

/// A fixed-size dancing-links matrix for an exact cover problem.
///
/// Rows are numbered `1..=rows()` and columns `1..=columns()`. The store is
/// allocated once with [`Store::new`], filled with [`Store::annex_row`] and
/// then searched with [`Store::search`]; a search leaves every link exactly
/// as it found it, so the same store can be searched again.
///
/// # Examples
///
/// ```
/// use exact_cover_links::Store;
///
/// let mut store = Store::new(3, 3)?;
/// store.annex_row(1, &[1, 2])?;
/// store.annex_row(2, &[3])?;
/// store.annex_row(3, &[2, 3])?;
/// assert_eq!(store.solve_all(), vec![vec![1, 2]]);
/// assert_eq!(store.solution_count(), 1);
/// # Ok::<(), exact_cover_links::BuildError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    pub(crate) root: Root,
    /// The headers of columns `1..=columns`, stored at offset `column - 1`.
    pub(crate) columns: Vec<ColumnHeader>,
    /// The headers of rows `1..=rows`, stored at offset `row - 1`.
    pub(crate) rows: Vec<RowHeader>,
    /// The `rows × columns` data nodes in row-major order.
    pub(crate) cells: Vec<Cell>,
    /// Per-level scratch, indexed by search depth. Entry 0 is never used.
    pub(crate) frames: Vec<Frame>,
    /// The sum of the lengths of the rows currently chosen by the search.
    /// Chosen rows are disjoint, so this counts the covered columns.
    pub(crate) cover_sum: u32,
    pub(crate) solutions: u64,
}

impl Store {
    /// Allocates an empty matrix with the given dimensions, in which every
    /// column is active and has no rows.
    ///
    /// # Errors
    ///
    /// Fails if either dimension exceeds [`MAX_INDEX`].
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows > MAX_INDEX {
            return Err(BuildError::TooManyRows { rows });
        }
        if columns > MAX_INDEX {
            return Err(BuildError::TooManyColumns { columns });
        }
        // The header row: a ring over all columns in ascending order.
        let headers = (1..=columns)
            .map(|col| ColumnHeader {
                left: ColIndex::new(if col == 1 { columns } else { col - 1 }),
                right: ColIndex::new(if col == columns { 1 } else { col + 1 }),
                first: RowIndex::HEADER,
                last: RowIndex::HEADER,
                len: 0,
                linked: true,
            })
            .collect();
        let row_headers = vec![
            RowHeader {
                up: RowIndex::HEADER,
                down: RowIndex::HEADER,
                first: ColIndex::HEADER,
                len: 0,
                annexed: false,
                removed_at: None,
            };
            rows
        ];
        debug!(rows, columns, "allocated exact cover matrix");
        Ok(Self {
            root: Root {
                first_column: ColIndex::new(columns.min(1)),
                last_column: ColIndex::new(columns),
                columns_linked: columns > 0,
                first_row: RowIndex::HEADER,
                last_row: RowIndex::HEADER,
                rows_linked: false,
            },
            columns: headers,
            rows: row_headers,
            cells: vec![Cell::default(); rows * columns],
            // A search can go at most one level deeper than the number of
            // rows it chooses.
            frames: vec![Frame::IDLE; rows + 2],
            cover_sum: 0,
            solutions: 0,
        })
    }

    /// Allocates a matrix with one column per item in `1..=columns` and
    /// annexes `rows[0]` as row 1, `rows[1]` as row 2, and so on.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Store::new`] and
    /// [`Store::annex_row`].
    pub fn from_rows<R: AsRef<[usize]>>(columns: usize, rows: &[R]) -> Result<Self> {
        let mut store = Self::new(rows.len(), columns)?;
        for (ix, row) in rows.iter().enumerate() {
            store.annex_row(ix + 1, row.as_ref())?;
        }
        Ok(store)
    }

    /// Appends a row that occupies exactly the given columns.
    ///
    /// The columns must be listed in strictly ascending order, and rows must
    /// be annexed in ascending order; not every allocated row needs to be
    /// annexed.
    ///
    /// # Errors
    ///
    /// Fails without modifying the store if `row` is out of range, already
    /// annexed or lower than a previously annexed row, or if `columns` is
    /// empty, unsorted, contains duplicates or is out of range.
    pub fn annex_row(&mut self, row: usize, columns: &[usize]) -> Result<()> {
        self.validate_row(row, columns)?;
        let row_ix = RowIndex::new(row);
        self.append_row_header(row_ix);

        let mut prev: Option<ColIndex> = None;
        for &col in columns {
            let col_ix = ColIndex::new(col);
            self.append_cell(row_ix, col_ix);
            // Link the new cell to the previously visited column.
            if let Some(prev) = prev {
                self.cell_mut(row_ix, prev).right = col_ix;
                self.cell_mut(row_ix, col_ix).left = prev;
            }
            prev = Some(col_ix);
        }

        // Close the row into a horizontal ring.
        let first = ColIndex::new(columns[0]);
        let last = ColIndex::new(columns[columns.len() - 1]);
        self.cell_mut(row_ix, first).left = last;
        self.cell_mut(row_ix, last).right = first;
        let header = self.row_header_mut(row_ix);
        header.first = first;
        // `columns.len()` is bounded by the column count, which fits.
        header.len = columns.len() as u16;
        header.annexed = true;
        trace!(row, len = columns.len(), "annexed row");
        Ok(())
    }

    fn validate_row(&self, row: usize, columns: &[usize]) -> Result<()> {
        if row == 0 || row > self.rows.len() {
            return Err(BuildError::RowOutOfRange {
                row,
                rows: self.rows.len(),
            });
        }
        if self.rows[row - 1].annexed {
            return Err(BuildError::RowAlreadyAnnexed { row });
        }
        let last = self.root.last_row.get();
        if self.root.rows_linked && row < last {
            return Err(BuildError::RowOutOfOrder { row, last });
        }
        if columns.is_empty() {
            return Err(BuildError::EmptyRow { row });
        }
        let mut prev = 0;
        for &column in columns {
            if column == 0 || column > self.columns.len() {
                return Err(BuildError::ColumnOutOfRange {
                    row,
                    column,
                    columns: self.columns.len(),
                });
            }
            if column <= prev {
                return Err(BuildError::ColumnsNotAscending { row, column });
            }
            prev = column;
        }
        Ok(())
    }

    /// Inserts a row header after the tail of the ring of active rows.
    fn append_row_header(&mut self, ix: RowIndex) {
        let (up, down) = if self.root.rows_linked {
            let (first, last) = (self.root.first_row, self.root.last_row);
            self.row_header_mut(last).down = ix;
            self.row_header_mut(first).up = ix;
            (last, first)
        } else {
            self.root.first_row = ix;
            self.root.rows_linked = true;
            (ix, ix)
        };
        self.root.last_row = ix;
        let header = self.row_header_mut(ix);
        header.up = up;
        header.down = down;
    }

    /// Inserts a new cell after the tail of a column's vertical ring.
    fn append_cell(&mut self, row: RowIndex, col: ColIndex) {
        let header = self.column(col);
        let (up, down) = if header.len > 0 {
            let (first, last) = (header.first, header.last);
            self.cell_mut(last, col).down = row;
            self.cell_mut(first, col).up = row;
            (last, first)
        } else {
            self.column_mut(col).first = row;
            (row, row)
        };
        let header = self.column_mut(col);
        header.last = row;
        header.len += 1;
        let cell = self.cell_mut(row, col);
        cell.up = up;
        cell.down = down;
        cell.linked = true;
    }

    // Queries.

    /// Returns the number of allocated rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of exact covers found by all searches so far.
    pub fn solution_count(&self) -> u64 {
        self.solutions
    }

    /// Returns whether `row` has been annexed and is currently linked.
    pub fn is_row_active(&self, row: usize) -> bool {
        self.row_header_at(row)
            .is_some_and(|header| header.annexed && header.linked())
    }

    /// Returns whether `column` exists and is not covered.
    pub fn is_column_active(&self, column: usize) -> bool {
        self.column_at(column).is_some_and(|header| header.linked)
    }

    /// Returns the number of active rows occupying `column`, or [`None`] if
    /// the column does not exist.
    pub fn column_len(&self, column: usize) -> Option<usize> {
        self.column_at(column).map(|header| usize::from(header.len))
    }

    /// Returns the number of columns occupied by `row`, or [`None`] if the
    /// row does not exist or has not been annexed.
    pub fn row_len(&self, row: usize) -> Option<usize> {
        self.row_header_at(row)
            .filter(|header| header.annexed)
            .map(|header| usize::from(header.len))
    }

    /// Returns the columns occupied by `row` in ascending order; the list
    /// is empty if the row has not been annexed.
    pub fn row_columns(&self, row: usize) -> Vec<usize> {
        let Some(header) = self.row_header_at(row).filter(|h| h.annexed) else {
            return Vec::new();
        };
        let row_ix = RowIndex::new(row);
        let mut result = Vec::with_capacity(usize::from(header.len));
        let mut col = header.first;
        loop {
            result.push(col.get());
            col = self.cell(row_ix, col).right;
            if col == header.first {
                break;
            }
        }
        result
    }

    /// Returns the active columns in ring order.
    pub fn active_columns(&self) -> Vec<usize> {
        let mut result = Vec::new();
        if !self.root.columns_linked {
            return result;
        }
        let start = self.root.first_column;
        let mut col = start;
        loop {
            result.push(col.get());
            col = self.column(col).right;
            if col == start {
                break;
            }
        }
        result
    }

    /// Returns the active rows in ring order.
    pub fn active_rows(&self) -> Vec<usize> {
        let mut result = Vec::new();
        if !self.root.rows_linked {
            return result;
        }
        let start = self.root.first_row;
        let mut row = start;
        loop {
            result.push(row.get());
            row = self.row_header(row).down;
            if row == start {
                break;
            }
        }
        result
    }

    // Accessor methods.

    fn column_at(&self, column: usize) -> Option<&ColumnHeader> {
        column.checked_sub(1).and_then(|ix| self.columns.get(ix))
    }

    fn row_header_at(&self, row: usize) -> Option<&RowHeader> {
        row.checked_sub(1).and_then(|ix| self.rows.get(ix))
    }

    /// Returns a reference to the header of a column.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds or refers to the
    /// header column.
    pub(crate) fn column(&self, ix: ColIndex) -> &ColumnHeader {
        &self.columns[ix.get() - 1]
    }

    pub(crate) fn column_mut(&mut self, ix: ColIndex) -> &mut ColumnHeader {
        &mut self.columns[ix.get() - 1]
    }

    /// Returns a reference to the header of a row.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds or refers to the
    /// header row.
    pub(crate) fn row_header(&self, ix: RowIndex) -> &RowHeader {
        &self.rows[ix.get() - 1]
    }

    pub(crate) fn row_header_mut(&mut self, ix: RowIndex) -> &mut RowHeader {
        &mut self.rows[ix.get() - 1]
    }

    fn cell_offset(&self, row: RowIndex, col: ColIndex) -> usize {
        debug_assert!(!row.is_header() && !col.is_header(), "header cells are not data nodes");
        (row.get() - 1) * self.columns.len() + (col.get() - 1)
    }

    /// Returns a reference to the data node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if either index is out of bounds.
    pub(crate) fn cell(&self, row: RowIndex, col: ColIndex) -> &Cell {
        &self.cells[self.cell_offset(row, col)]
    }

    pub(crate) fn cell_mut(&mut self, row: RowIndex, col: ColIndex) -> &mut Cell {
        let offset = self.cell_offset(row, col);
        &mut self.cells[offset]
    }
}
