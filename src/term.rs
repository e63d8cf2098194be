//! Linear terms over local variable indices.

use std::fmt;

use crate::numeric::Coefficient;

/// A linear combination `Σ cᵢ·xᵢ` over local column indices.
///
/// Each column occurs at most once and no coefficient is zero. Used as the
/// source of an elimination before the expression exists as a matrix row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTerm<T> {
    coeffs: Vec<(usize, T)>,
}

impl<T: Coefficient> LinearTerm<T> {
    /// Create an empty term.
    pub fn new() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Add `coeff·x_j`, merging with an existing monomial on `j`.
    pub fn add_monomial(&mut self, j: usize, coeff: T) {
        match self.coeffs.iter().position(|(k, _)| *k == j) {
            Some(pos) => {
                self.coeffs[pos].1 += coeff;
                if self.coeffs[pos].1.is_zero() {
                    self.coeffs.swap_remove(pos);
                }
            }
            None if !coeff.is_zero() => self.coeffs.push((j, coeff)),
            None => {}
        }
    }

    /// Coefficient of `x_j`, if present.
    pub fn coeff(&self, j: usize) -> Option<&T> {
        self.coeffs.iter().find(|(k, _)| *k == j).map(|(_, c)| c)
    }

    /// Iterate over `(column, coefficient)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.coeffs.iter().map(|(j, c)| (*j, c))
    }

    /// Number of monomials.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns `true` if the term has no monomials.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Largest column index mentioned, if any.
    pub fn max_column(&self) -> Option<usize> {
        self.coeffs.iter().map(|(j, _)| *j).max()
    }

    /// Evaluate the term against a dense assignment.
    pub fn eval(&self, assignment: &[T]) -> T {
        self.coeffs
            .iter()
            .fold(T::zero(), |acc, (j, c)| acc + c.clone() * assignment[*j].clone())
    }
}

impl<T: Coefficient> Default for LinearTerm<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coefficient> FromIterator<(usize, T)> for LinearTerm<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut term = Self::new();
        for (j, c) in iter {
            term.add_monomial(j, c);
        }
        term
    }
}

impl<T: Coefficient> fmt::Display for LinearTerm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeffs.is_empty() {
            return write!(f, "0");
        }
        for (n, (j, c)) in self.coeffs.iter().enumerate() {
            if n > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", c, j)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monomials_merge_and_cancel() {
        let mut t = LinearTerm::<i64>::new();
        t.add_monomial(2, 3);
        t.add_monomial(0, 1);
        t.add_monomial(2, -3);
        assert_eq!(t.len(), 1);
        assert_eq!(t.coeff(0), Some(&1));
        assert_eq!(t.coeff(2), None);
    }

    #[test]
    fn test_zero_coefficient_is_ignored() {
        let t: LinearTerm<i64> = [(4, 0), (1, 2)].into_iter().collect();
        assert_eq!(t.len(), 1);
        assert_eq!(t.max_column(), Some(1));
    }

    #[test]
    fn test_eval() {
        let t: LinearTerm<f64> = [(0, 2.0), (2, -1.0)].into_iter().collect();
        approx::assert_relative_eq!(t.eval(&[1.5, 100.0, 4.0]), -1.0);
    }
}
