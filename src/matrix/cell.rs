//! Row and column cells of the sparse matrix.
//!
//! Every nonzero lives in exactly two places: a [`RowCell`] in its row and a
//! [`ColumnCell`] in its column. Each side stores the other's position, so a
//! cell can be reached from either direction in O(1). Only the row side holds
//! the coefficient.

use std::fmt;

/// A nonzero entry owned by a row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCell<T> {
    pub(super) column: usize,
    pub(super) offset: usize,
    pub(super) coeff: T,
}

impl<T> RowCell<T> {
    pub(super) fn new(column: usize, offset: usize, coeff: T) -> Self {
        Self {
            column,
            offset,
            coeff,
        }
    }

    /// Column this entry occupies.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Position of the mirroring [`ColumnCell`] inside the column.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The coefficient.
    #[inline]
    pub fn coeff(&self) -> &T {
        &self.coeff
    }
}

impl<T: fmt::Display> fmt::Display for RowCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(col={}, offset={}, coeff={})",
            self.column, self.offset, self.coeff
        )
    }
}

/// The column-side mirror of a [`RowCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnCell {
    pub(super) row: usize,
    pub(super) offset: usize,
}

impl ColumnCell {
    pub(super) fn new(row: usize, offset: usize) -> Self {
        Self { row, offset }
    }

    /// Row holding the entry.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Position of the mirroring [`RowCell`] inside the row.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ColumnCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row={}, offset={})", self.row, self.offset)
    }
}
