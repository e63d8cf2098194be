//! Sparse matrix with cross-indexed row and column lists.

use std::fmt;
use std::ops::Index;

use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::{debug, trace, warn};

use super::basis::BasisHeading;
use super::cell::{ColumnCell, RowCell};
use super::indexed_vector::IndexedVector;
use crate::numeric::{self, Coefficient};
use crate::term::LinearTerm;

/// Matrix shape recorded by [`StaticMatrix::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dim {
    rows: usize,
    columns: usize,
}

/// Sparse matrix storing every nonzero twice: once in its row, once in its
/// column.
///
/// Rows own the coefficients; columns only point back into the rows. For
/// every row `r` and position `p` with `rows[r][p] = (j, o, v)` the column
/// list satisfies `columns[j][o] = (r, p)`. Every public method restores this
/// before returning.
///
/// Cells are kept in insertion order, not sorted by index. Each `(row,
/// column)` pair holds at most one cell.
#[derive(Debug, Clone)]
pub struct StaticMatrix<T> {
    pub(super) rows: Vec<Vec<RowCell<T>>>,
    pub(super) columns: Vec<Vec<ColumnCell>>,
    /// Per column: offset of that column inside the row being merged into.
    /// All `None` between calls.
    pub(super) row_offsets: Vec<Option<usize>>,
    work_vector: IndexedVector<T>,
    scopes: Vec<Dim>,
}

impl<T: Coefficient> Default for StaticMatrix<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T: Coefficient> StaticMatrix<T> {
    /// Create a matrix with `m` empty rows and `n` empty columns.
    pub fn new(m: usize, n: usize) -> Self {
        let mut matrix = Self {
            rows: Vec::new(),
            columns: Vec::new(),
            row_offsets: Vec::new(),
            work_vector: IndexedVector::default(),
            scopes: Vec::new(),
        };
        matrix.init_empty_matrix(m, n);
        matrix
    }

    /// Create an empty matrix with room for `rows` rows and `columns` columns.
    pub fn with_capacity(rows: usize, columns: usize) -> Self {
        let mut matrix = Self::new(0, 0);
        matrix.rows.reserve(rows);
        matrix.columns.reserve(columns);
        matrix.row_offsets.reserve(columns);
        matrix
    }

    /// Drop all rows, columns and recorded scopes.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.row_offsets.clear();
        self.work_vector.clear();
        self.scopes.clear();
    }

    /// Reset to `m` empty rows and `n` empty columns.
    pub fn init_empty_matrix(&mut self, m: usize, n: usize) {
        self.clear();
        self.rows.resize_with(m, Vec::new);
        self.columns.resize_with(n, Vec::new);
        self.row_offsets.resize(n, None);
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Append an empty column.
    pub fn add_column(&mut self) {
        self.columns.push(Vec::new());
        self.row_offsets.push(None);
    }

    /// Append columns until `j` is a valid column index.
    pub fn add_columns_up_to(&mut self, j: usize) {
        while j >= self.column_count() {
            self.add_column();
        }
    }

    /// The cells of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[RowCell<T>] {
        &self.rows[i]
    }

    /// The cells of column `j`.
    #[inline]
    pub fn column_cells(&self, j: usize) -> &[ColumnCell] {
        &self.columns[j]
    }

    /// Iterate over `(row, coefficient)` for every entry of column `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.columns[j]
            .iter()
            .map(move |c| (c.row, &self.rows[c.row][c.offset].coeff))
    }

    /// Coefficient of the row cell mirrored by `c`.
    #[inline]
    pub fn get_val(&self, c: &ColumnCell) -> &T {
        &self.rows[c.row][c.offset].coeff
    }

    /// The column cell mirroring `rc`.
    #[inline]
    pub fn get_column_cell(&self, rc: &RowCell<T>) -> ColumnCell {
        self.columns[rc.column][rc.offset]
    }

    fn offset_in_row(&self, i: usize, j: usize) -> Option<usize> {
        self.rows[i].iter().position(|c| c.column == j)
    }

    /// Append a new entry `v` at `(i, j)`.
    ///
    /// The caller guarantees row `i` has no entry in column `j` yet; use
    /// [`set`](Self::set) otherwise. Columns are added as needed.
    pub fn add_new_element(&mut self, i: usize, j: usize, v: T) {
        debug_assert!(
            self.offset_in_row(i, j).is_none(),
            "duplicate entry at ({i}, {j})"
        );
        self.add_columns_up_to(j);
        let row_offset = self.rows[i].len();
        let column_offset = self.columns[j].len();
        self.rows[i].push(RowCell::new(j, column_offset, v));
        self.columns[j].push(ColumnCell::new(i, row_offset));
    }

    /// Write `v` at `(i, j)`.
    ///
    /// Overwrites an existing entry in place. Writing zero removes the entry,
    /// so the matrix never stores an explicit zero.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        match self.offset_in_row(i, j) {
            Some(offset) if v.is_zero() => self.remove_cell(i, offset),
            Some(offset) => self.rows[i][offset].coeff = v,
            None if v.is_zero() => {}
            None => self.add_new_element(i, j, v),
        }
        self.verify();
    }

    /// Coefficient at `(i, j)`, or zero if absent.
    pub fn get_elem(&self, i: usize, j: usize) -> T {
        self.rows[i]
            .iter()
            .find(|c| c.column == j)
            .map_or_else(T::zero, |c| c.coeff.clone())
    }

    /// Remove the entry at `offset` of row `i` from both its row and its
    /// column.
    pub fn remove_element(&mut self, i: usize, offset: usize) {
        self.remove_cell(i, offset);
        self.verify();
    }

    /// Swap-remove on both sides, patching the mirror of whichever cell moves
    /// into the vacated slot.
    fn remove_cell(&mut self, i: usize, row_offset: usize) {
        let (j, column_offset) = {
            let rc = &self.rows[i][row_offset];
            (rc.column, rc.offset)
        };

        let column = &mut self.columns[j];
        column.swap_remove(column_offset);
        if let Some(moved) = column.get(column_offset) {
            self.rows[moved.row][moved.offset].offset = column_offset;
        }

        let row = &mut self.rows[i];
        row.swap_remove(row_offset);
        if let Some(moved) = row.get(row_offset) {
            self.columns[moved.column][moved.offset].offset = row_offset;
        }
    }

    /// Multiply every coefficient of row `i` by `alpha`.
    pub fn multiply_row(&mut self, i: usize, alpha: &T) {
        for c in &mut self.rows[i] {
            c.coeff *= alpha.clone();
        }
    }

    /// Divide every coefficient of row `i` by `alpha`.
    pub fn divide_row(&mut self, i: usize, alpha: &T) {
        for c in &mut self.rows[i] {
            c.coeff /= alpha.clone();
        }
    }

    /// Multiply every coefficient of column `j` by `alpha`.
    pub fn multiply_column(&mut self, j: usize, alpha: &T) {
        for c in &self.columns[j] {
            self.rows[c.row][c.offset].coeff *= alpha.clone();
        }
    }

    fn scan_row_to_work_vector(&mut self, k: usize) {
        for (offset, c) in self.rows[k].iter().enumerate() {
            self.row_offsets[c.column] = Some(offset);
        }
    }

    fn accumulate(&mut self, k: usize, j: usize, delta: T) {
        match self.row_offsets.get(j).copied().flatten() {
            Some(offset) => self.rows[k][offset].coeff += delta,
            None => {
                self.add_new_element(k, j, delta);
                self.row_offsets[j] = Some(self.rows[k].len() - 1);
            }
        }
    }

    /// Reset the offsets scanned for row `k` and drop entries that cancelled.
    fn finish_merge(&mut self, k: usize) {
        for c in &self.rows[k] {
            self.row_offsets[c.column] = None;
        }
        for offset in (0..self.rows[k].len()).rev() {
            if self.rows[k][offset].coeff.is_zero() {
                self.remove_cell(k, offset);
            }
        }
    }

    fn merge_row_into_row(&mut self, alpha: &T, i: usize, k: usize, skip: Option<usize>) {
        assert_ne!(i, k, "cannot merge row {i} into itself");
        self.scan_row_to_work_vector(k);
        for idx in 0..self.rows[i].len() {
            let j = self.rows[i][idx].column;
            if skip == Some(j) {
                continue;
            }
            let delta = alpha.clone() * self.rows[i][idx].coeff.clone();
            self.accumulate(k, j, delta);
        }
        self.finish_merge(k);
    }

    fn merge_term_into_row(&mut self, alpha: &T, term: &LinearTerm<T>, k: usize, skip: Option<usize>) {
        self.scan_row_to_work_vector(k);
        for (j, c) in term.iter() {
            if skip == Some(j) {
                continue;
            }
            self.accumulate(k, j, alpha.clone() * c.clone());
        }
        self.finish_merge(k);
    }

    /// Row `k` ← row `k` + `alpha`·row `i`.
    ///
    /// Entries that cancel to exactly zero are removed from row `k`.
    pub fn add_rows(&mut self, alpha: &T, i: usize, k: usize) {
        self.merge_row_into_row(alpha, i, k, None);
        self.verify();
    }

    /// Row `i` ← row `i` + `alpha`·`term`.
    pub fn add_term_to_row(&mut self, alpha: &T, term: &LinearTerm<T>, i: usize) {
        self.merge_term_into_row(alpha, term, i, None);
        self.verify();
    }

    /// Eliminate column `j` from the row of `c` using pivot row `i`.
    ///
    /// `c` must be a cell of column `j` in a row other than `i`. That row
    /// becomes `row - (a / p)·row i`, where `a` is its coefficient on `j` and
    /// `p` the pivot row's. The entry on `j` is removed outright. Returns
    /// `true` if the eliminated row still has entries.
    ///
    /// `a / p` must be exact, so integer coefficients need `p = ±1`; use
    /// [`pivot_row_to_row_given_cell_with_sign`](Self::pivot_row_to_row_given_cell_with_sign)
    /// for those.
    pub fn pivot_row_to_row_given_cell(&mut self, i: usize, c: ColumnCell, j: usize) -> bool {
        let pivot = match self.offset_in_row(i, j) {
            Some(offset) => self.rows[i][offset].coeff.clone(),
            None => panic!("pivot row {i} has no entry in column {j}"),
        };
        let alpha = -(self.get_val(&c).clone() / pivot);
        self.eliminate_with_row(i, c, j, alpha)
    }

    /// Like [`pivot_row_to_row_given_cell`](Self::pivot_row_to_row_given_cell)
    /// for a pivot row already normalised so that its coefficient on `j` is
    /// `j_sign` (`1` or `-1`).
    pub fn pivot_row_to_row_given_cell_with_sign(
        &mut self,
        i: usize,
        c: ColumnCell,
        j: usize,
        j_sign: i32,
    ) -> bool {
        let alpha = signed_alpha(self.get_val(&c).clone(), j_sign);
        self.eliminate_with_row(i, c, j, alpha)
    }

    fn eliminate_with_row(&mut self, i: usize, c: ColumnCell, j: usize, alpha: T) -> bool {
        let ii = c.row;
        assert_ne!(i, ii, "cell lies in the pivot row itself");
        debug_assert_eq!(self.rows[ii][c.offset].column, j);
        trace!(pivot_row = i, row = ii, column = j, "eliminating column");

        self.remove_cell(ii, c.offset);
        self.merge_row_into_row(&alpha, i, ii, Some(j));
        self.verify();
        !self.rows[ii].is_empty()
    }

    /// Eliminate column `j` from the row of `c` using `term` as pivot row.
    ///
    /// `term` plays the role of a row whose coefficient on `j` is `j_sign`.
    /// Returns `true` if the eliminated row still has entries.
    pub fn pivot_term_to_row_given_cell(
        &mut self,
        term: &LinearTerm<T>,
        c: ColumnCell,
        j: usize,
        j_sign: i32,
    ) -> bool {
        let ii = c.row;
        debug_assert_eq!(self.rows[ii][c.offset].column, j);
        let alpha = signed_alpha(self.get_val(&c).clone(), j_sign);

        self.remove_cell(ii, c.offset);
        self.merge_term_into_row(&alpha, term, ii, Some(j));
        self.verify();
        !self.rows[ii].is_empty()
    }

    /// Write `bj - term` into the last row, substituting every basic variable
    /// by its defining row.
    ///
    /// Rows named by `basis_heading` must be normalised: coefficient one on
    /// their basic column, all other entries nonbasic. The result mentions
    /// nonbasic columns only, plus a unit coefficient on the last column.
    pub fn fill_last_row_with_pivoting<H>(&mut self, term: &LinearTerm<T>, bj: usize, basis_heading: &H)
    where
        H: BasisHeading + ?Sized,
    {
        assert!(self.row_count() > 0, "no row to fill");
        assert!(self.column_count() > 0, "no column for the basic variable");

        let mut work = std::mem::take(&mut self.work_vector);
        work.clear();
        work.resize(self.column_count());
        // -term + bj = 0
        work.set_value(T::one(), bj);
        for (j, c) in term.iter() {
            work.set_value(-c.clone(), j);
        }

        self.fill_last_row_with_pivoting_loop_block(&mut work, bj, basis_heading);
        for (j, _) in term.iter() {
            self.fill_last_row_with_pivoting_loop_block(&mut work, j, basis_heading);
        }

        let last_row = self.row_count() - 1;
        for (j, v) in work.iter() {
            self.set(last_row, j, v.clone());
        }
        let last_column = self.column_count() - 1;
        self.set(last_row, last_column, T::one());

        self.work_vector = work;
    }

    /// Substitute column `j` of `work` by its defining row, if `j` is basic.
    fn fill_last_row_with_pivoting_loop_block<H>(&self, work: &mut IndexedVector<T>, j: usize, basis_heading: &H)
    where
        H: BasisHeading + ?Sized,
    {
        let Some(row_index) = basis_heading.basic_row(j) else {
            return;
        };
        let alpha = work[j].clone();
        if alpha.is_zero() {
            return;
        }
        for c in &self.rows[row_index] {
            if c.column == j {
                continue;
            }
            work.add_value_at(c.column, -(alpha.clone() * c.coeff.clone()));
        }
        work.set_value(T::zero(), j);
    }

    /// Physically remove row `k`.
    ///
    /// Its cells leave their columns, the row is erased, and every later row
    /// shifts up by one with its column cells renumbered, all in one call.
    pub fn cross_out_row(&mut self, k: usize) {
        self.cross_out_row_from_columns(k);
        self.rows.remove(k);
        self.fix_row_indices_in_each_column_for_crossed_row(k);
        self.verify();
    }

    fn cross_out_row_from_columns(&mut self, k: usize) {
        for offset in (0..self.rows[k].len()).rev() {
            self.remove_cell(k, offset);
        }
    }

    fn fix_row_indices_in_each_column_for_crossed_row(&mut self, k: usize) {
        for (i, row) in self.rows.iter().enumerate().skip(k) {
            for c in row {
                self.columns[c.column][c.offset].row = i;
            }
        }
    }

    /// Swap rows `i` and `ii`.
    pub fn transpose_rows(&mut self, i: usize, ii: usize) {
        if i == ii {
            return;
        }
        self.rows.swap(i, ii);
        for r in [i, ii] {
            for c in &self.rows[r] {
                self.columns[c.column][c.offset].row = r;
            }
        }
        self.verify();
    }

    /// Largest row index with an entry in column `j`, or zero if the column
    /// is empty.
    pub fn lowest_row_in_column(&self, j: usize) -> usize {
        self.columns[j].iter().map(|c| c.row).max().unwrap_or(0)
    }

    /// Σ `w[col]·coeff` over row `i`.
    pub fn dot_product_with_row(&self, i: usize, w: &[T]) -> T {
        self.rows[i]
            .iter()
            .fold(T::zero(), |acc, c| acc + w[c.column].clone() * c.coeff.clone())
    }

    /// Σ `y[row]·coeff` over column `j`.
    pub fn dot_product_with_column(&self, y: &[T], j: usize) -> T {
        self.column(j)
            .fold(T::zero(), |acc, (row, v)| acc + y[row].clone() * v.clone())
    }

    /// `v[row] += a·coeff` for every entry of column `j`.
    pub fn add_column_to_vector(&self, a: &T, j: usize, v: &mut [T]) {
        for (row, coeff) in self.column(j) {
            v[row] += a.clone() * coeff.clone();
        }
    }

    /// Scatter column `j` into `v`, resized to the row count. Positions
    /// without an entry keep their previous value.
    pub fn copy_column_to_vector(&self, j: usize, v: &mut Vec<T>) {
        v.resize(self.row_count(), T::zero());
        for (row, coeff) in self.column(j) {
            if !coeff.is_zero() {
                v[row] = coeff.clone();
            }
        }
    }

    /// Number of entries in column `j`.
    pub fn number_of_non_zeroes_in_column(&self, j: usize) -> usize {
        self.columns[j].len()
    }

    /// Number of entries in row `i`.
    pub fn number_of_non_zeroes_in_row(&self, i: usize) -> usize {
        self.rows[i].len()
    }

    /// Total number of entries.
    pub fn number_of_non_zeroes(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Record the current shape.
    pub fn push(&mut self) {
        self.scopes.push(Dim {
            rows: self.row_count(),
            columns: self.column_count(),
        });
        debug!(
            depth = self.scopes.len(),
            rows = self.row_count(),
            columns = self.column_count(),
            "matrix scope pushed"
        );
    }

    /// Number of recorded scopes.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Undo the growth of the last `k` scopes.
    ///
    /// Rows and columns appended since the matching [`push`](Self::push) are
    /// dropped. Coefficient edits and removals of older rows are not undone.
    /// Popping past the bottom of the stack stops there.
    pub fn pop(&mut self, k: usize) {
        for _ in 0..k {
            let Some(dim) = self.scopes.pop() else {
                break;
            };
            while self.row_count() > dim.rows {
                self.pop_last_row();
            }
            self.truncate_columns(dim.columns);
        }
        debug!(
            depth = self.scopes.len(),
            rows = self.row_count(),
            columns = self.column_count(),
            "matrix scope popped"
        );
        self.verify();
    }

    fn pop_last_row(&mut self) {
        let last = self.row_count() - 1;
        self.cross_out_row_from_columns(last);
        self.rows.pop();
    }

    fn truncate_columns(&mut self, n: usize) {
        for j in n..self.column_count() {
            while let Some(c) = self.columns[j].last().copied() {
                warn!(row = c.row, column = j, "dropping entry of a retained row in a popped column");
                self.remove_cell(c.row, c.offset);
            }
        }
        self.columns.truncate(n);
        self.row_offsets.truncate(n);
    }

    #[cfg(any(debug_assertions, feature = "verify"))]
    fn verify(&self) {
        if let Some(message) = self.find_inconsistency() {
            panic!("matrix invariant broken: {message}");
        }
    }

    #[cfg(not(any(debug_assertions, feature = "verify")))]
    #[inline(always)]
    fn verify(&self) {}
}

fn signed_alpha<T: Coefficient>(value: T, j_sign: i32) -> T {
    if j_sign < 0 {
        value
    } else {
        -value
    }
}

impl StaticMatrix<BigRational> {
    /// Least common multiple of the denominators in row `i`.
    pub fn row_denominators_lcm(&self, i: usize) -> BigInt {
        numeric::denominators_lcm(self.rows[i].iter().map(RowCell::coeff))
    }
}

impl<T> Index<usize> for StaticMatrix<T> {
    type Output = [RowCell<T>];

    fn index(&self, i: usize) -> &Self::Output {
        &self.rows[i]
    }
}

impl<T: Coefficient> fmt::Display for StaticMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "row {i}:")?;
            for c in row {
                write!(f, " {}*x{}", c.coeff, c.column)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
