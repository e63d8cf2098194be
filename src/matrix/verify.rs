//! Full consistency scans.
//!
//! These walk every stored entry and are meant for tests and debug checks,
//! never for the pivoting hot path. Debug builds, and release builds with the
//! `verify` feature, run [`StaticMatrix::find_inconsistency`] after every
//! structural mutation and panic on the first violation.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use super::StaticMatrix;
use crate::numeric::Coefficient;

impl<T: Coefficient> StaticMatrix<T> {
    /// Describe the first cross-index violation found, if any.
    pub fn find_inconsistency(&self) -> Option<String> {
        if self.row_offsets.len() != self.columns.len() {
            return Some(format!(
                "offset scratch has {} slots for {} columns",
                self.row_offsets.len(),
                self.columns.len()
            ));
        }
        if let Some(j) = self.row_offsets.iter().position(Option::is_some) {
            return Some(format!("offset scratch not reset at column {j}"));
        }

        for (r, row) in self.rows.iter().enumerate() {
            let mut seen = FxHashSet::default();
            for (p, rc) in row.iter().enumerate() {
                if !seen.insert(rc.column) {
                    return Some(format!("row {r} holds column {} twice", rc.column));
                }
                let mirror = self
                    .columns
                    .get(rc.column)
                    .and_then(|col| col.get(rc.offset));
                match mirror {
                    Some(cc) if cc.row == r && cc.offset == p => {}
                    Some(cc) => {
                        return Some(format!(
                            "row cell ({r}, {p}) points at column cell {cc} of column {}",
                            rc.column
                        ))
                    }
                    None => {
                        return Some(format!("row cell ({r}, {p}) has a dangling mirror {rc}"))
                    }
                }
            }
        }

        for (j, column) in self.columns.iter().enumerate() {
            for (o, cc) in column.iter().enumerate() {
                let mirror = self.rows.get(cc.row).and_then(|row| row.get(cc.offset));
                match mirror {
                    Some(rc) if rc.column == j && rc.offset == o => {}
                    _ => {
                        return Some(format!(
                            "column cell ({j}, {o}) = {cc} has no matching row cell"
                        ))
                    }
                }
            }
        }
        None
    }

    /// Returns `true` if every row cell and column cell mirror each other.
    pub fn is_correct(&self) -> bool {
        self.find_inconsistency().is_none()
    }

    /// Every populated `(row, column)` position, collected from the rows.
    pub fn get_domain(&self) -> BTreeSet<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |c| (i, c.column)))
            .collect()
    }

    /// Every populated `(row, column)` position, collected from the columns.
    pub fn get_column_domain(&self) -> BTreeSet<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(j, column)| column.iter().map(move |c| (c.row, j)))
            .collect()
    }

    /// Panic unless the row and column views describe the same positions
    /// and the cross-index holds.
    pub fn check_consistency(&self) {
        assert_eq!(
            self.get_domain(),
            self.get_column_domain(),
            "row and column domains differ"
        );
        if let Some(message) = self.find_inconsistency() {
            panic!("{message}");
        }
    }
}
