//! Basis heading lookup.

/// Maps a column to the row defining it as a basic variable.
///
/// Implemented for typed headings (`Option<usize>` per column) and for the
/// classic signed layout where a negative entry marks a nonbasic column.
/// Columns past the end of the heading are nonbasic.
pub trait BasisHeading {
    /// Row defining `j`, or `None` if `j` is nonbasic.
    fn basic_row(&self, j: usize) -> Option<usize>;
}

impl BasisHeading for [Option<usize>] {
    fn basic_row(&self, j: usize) -> Option<usize> {
        self.get(j).copied().flatten()
    }
}

impl BasisHeading for [i32] {
    fn basic_row(&self, j: usize) -> Option<usize> {
        self.get(j).and_then(|&r| usize::try_from(r).ok())
    }
}

impl BasisHeading for Vec<Option<usize>> {
    fn basic_row(&self, j: usize) -> Option<usize> {
        self.as_slice().basic_row(j)
    }
}

impl BasisHeading for Vec<i32> {
    fn basic_row(&self, j: usize) -> Option<usize> {
        self.as_slice().basic_row(j)
    }
}
