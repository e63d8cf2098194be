//! Tableau configuration.

use super::{DEFAULT_COLUMN_CAPACITY, DEFAULT_ROW_CAPACITY};

/// Configuration for a [`Tableau`](super::Tableau).
#[derive(Debug, Clone)]
pub struct TableauConfig {
    /// Run the full cross-index scan after every structural operation.
    pub check_consistency: bool,
    /// Rows to reserve up front.
    pub row_capacity: usize,
    /// Columns to reserve up front.
    pub column_capacity: usize,
}

impl Default for TableauConfig {
    fn default() -> Self {
        Self {
            check_consistency: false,
            row_capacity: DEFAULT_ROW_CAPACITY,
            column_capacity: DEFAULT_COLUMN_CAPACITY,
        }
    }
}

impl TableauConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the consistency scan.
    ///
    /// The scan is O(nonzeros) per operation; leave it off outside of
    /// debugging.
    pub fn with_consistency_checks(mut self, enabled: bool) -> Self {
        self.check_consistency = enabled;
        self
    }

    /// Set the initial row and column capacity.
    pub fn with_capacity(mut self, rows: usize, columns: usize) -> Self {
        self.row_capacity = rows;
        self.column_capacity = columns;
        self
    }
}
