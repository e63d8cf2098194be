//! Sparse row/column matrix for Simplex tableaux.
//!
//! The matrix keeps two adjacency lists over the same nonzeros:
//!
//! ```text
//!            col 0        col 1        col 2
//! row 0   (0, o, 3)                 (2, o, -1)
//! row 1                (1, o, 2)    (2, o, 5)
//! ```
//!
//! A [`RowCell`] `(column, offset_in_column, coeff)` and its [`ColumnCell`]
//! `(row, offset_in_row)` always name each other's exact position. Every
//! structural primitive (insert, swap-remove, row swap, row removal) patches
//! both sides before it returns.
//!
//! Scoping is append-only: [`StaticMatrix::push`] records the shape and
//! [`StaticMatrix::pop`] drops trailing rows and columns added since. Callers
//! that rewrite coefficients of older rows keep their own trail.

mod basis;
mod cell;
mod diagnostics;
mod indexed_vector;
mod static_matrix;
mod verify;

pub use basis::BasisHeading;
pub use cell::{ColumnCell, RowCell};
pub use indexed_vector::IndexedVector;
pub use static_matrix::StaticMatrix;
