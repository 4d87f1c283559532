//! Errors raised while building a [`Store`](crate::Store).

use thiserror::Error;

/// Result type alias for matrix construction.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Precondition violations detected while allocating a store or annexing
/// a row.
///
/// A rejected call leaves the store untouched.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BuildError {
    /// The requested row count does not fit the 16-bit node grid.
    #[error("cannot allocate {rows} rows: at most {max} rows are addressable", max = crate::MAX_INDEX)]
    TooManyRows { rows: usize },

    /// The requested column count does not fit the 16-bit node grid.
    #[error("cannot allocate {columns} columns: at most {max} columns are addressable", max = crate::MAX_INDEX)]
    TooManyColumns { columns: usize },

    /// The row number is 0 or exceeds the allocated row count.
    #[error("row {row} is outside the allocated range 1..={rows}")]
    RowOutOfRange { row: usize, rows: usize },

    /// A column of the row is 0 or exceeds the allocated column count.
    #[error("row {row} refers to column {column}, outside the allocated range 1..={columns}")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        columns: usize,
    },

    /// The row has been annexed before.
    #[error("row {row} has already been annexed")]
    RowAlreadyAnnexed { row: usize },

    /// Rows must be annexed in ascending order.
    #[error("row {row} annexed after row {last}; rows must be annexed in ascending order")]
    RowOutOfOrder { row: usize, last: usize },

    /// The column list contains a duplicate or is not sorted.
    #[error("columns of row {row} must be strictly ascending, found {column} out of order")]
    ColumnsNotAscending { row: usize, column: usize },

    /// The row occupies no column.
    #[error("row {row} occupies no column")]
    EmptyRow { row: usize },
}
