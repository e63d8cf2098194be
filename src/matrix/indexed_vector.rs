//! Dense-keyed sparse accumulator.

use std::ops::Index;

use crate::numeric::Coefficient;

/// A dense coefficient array paired with the list of positions holding a
/// nonzero value.
///
/// Walking the nonzeros costs O(nnz) instead of O(len). Every mutation keeps
/// `index` equal to the set of nonzero positions.
#[derive(Debug, Clone)]
pub struct IndexedVector<T> {
    data: Vec<T>,
    index: Vec<usize>,
}

impl<T: Coefficient> IndexedVector<T> {
    /// Create an all-zero vector of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
            index: Vec::new(),
        }
    }

    /// Length of the dense array, counting zero positions.
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no position holds a nonzero value.
    pub fn is_zero(&self) -> bool {
        self.index.is_empty()
    }

    /// Positions holding a nonzero value, in insertion order.
    pub fn indices(&self) -> &[usize] {
        &self.index
    }

    /// Reset every nonzero to zero without touching the rest of the array.
    pub fn clear(&mut self) {
        for &j in &self.index {
            self.data[j] = T::zero();
        }
        self.index.clear();
    }

    /// Grow or shrink the dense array. Nonzeros past `len` are dropped.
    pub fn resize(&mut self, len: usize) {
        if len < self.data.len() {
            self.index.retain(|&j| j < len);
        }
        self.data.resize(len, T::zero());
    }

    /// Overwrite the value at `j`.
    pub fn set_value(&mut self, value: T, j: usize) {
        let was_zero = self.data[j].is_zero();
        let now_zero = value.is_zero();
        self.data[j] = value;
        match (was_zero, now_zero) {
            (true, false) => self.index.push(j),
            (false, true) => self.erase_from_index(j),
            _ => {}
        }
    }

    /// Add `delta` to the value at `j`, updating membership when the entry
    /// becomes zero or stops being zero.
    pub fn add_value_at(&mut self, j: usize, delta: T) {
        let was_zero = self.data[j].is_zero();
        self.data[j] += delta;
        let now_zero = self.data[j].is_zero();
        match (was_zero, now_zero) {
            (true, false) => self.index.push(j),
            (false, true) => self.erase_from_index(j),
            _ => {}
        }
    }

    fn erase_from_index(&mut self, j: usize) {
        if let Some(pos) = self.index.iter().position(|&k| k == j) {
            self.index.swap_remove(pos);
        }
    }

    /// Iterate over `(position, value)` for every nonzero.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.index.iter().map(move |&j| (j, &self.data[j]))
    }
}

impl<T> Default for IndexedVector<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            index: Vec::new(),
        }
    }
}

impl<T> Index<usize> for IndexedVector<T> {
    type Output = T;

    fn index(&self, j: usize) -> &T {
        &self.data[j]
    }
}
