/// The largest row or column number a [`Store`] can address.
///
/// Every link in the node grid is a 16-bit quantity. One slot of the signed
/// 16-bit range is reserved for the trailing bookkeeping row, and index 0
/// always denotes a header, so rows and columns are numbered from 1 up to
/// this bound.
///
/// [`Store`]: crate::Store
pub const MAX_INDEX: usize = i16::MAX as usize - 1;

/// The position of a row in the node grid of a [`Store`].
///
/// Row 0 is the header row, whose cells are the column headers.
///
/// [`Store`]: crate::Store
#[derive(Debug, Default, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct RowIndex(u16);

impl RowIndex {
    /// The header row.
    pub const HEADER: Self = Self(0);

    /// Creates a new index.
    ///
    /// The value must not exceed [`MAX_INDEX`]; callers validate user input
    /// before converting it.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        debug_assert!(ix <= MAX_INDEX, "row index exceeds the 16-bit bound");
        Self(ix as u16)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Returns whether this index refers to the header row.
    #[must_use]
    pub const fn is_header(self) -> bool {
        self.0 == 0
    }
}

/// The position of a column in the node grid of a [`Store`].
///
/// Column 0 is the header column, whose cells are the row headers.
///
/// [`Store`]: crate::Store
#[derive(Debug, Default, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct ColIndex(u16);

impl ColIndex {
    /// The header column.
    pub const HEADER: Self = Self(0);

    /// Creates a new index.
    ///
    /// The value must not exceed [`MAX_INDEX`].
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        debug_assert!(ix <= MAX_INDEX, "column index exceeds the 16-bit bound");
        Self(ix as u16)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Returns whether this index refers to the header column.
    #[must_use]
    pub const fn is_header(self) -> bool {
        self.0 == 0
    }
}
