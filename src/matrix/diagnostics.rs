//! Scalar summaries of rows and columns for pivot-stability heuristics.

use super::StaticMatrix;
use crate::numeric::Coefficient;

fn max_abs<'a, T, I>(values: I) -> T
where
    T: Coefficient + 'a,
    I: Iterator<Item = &'a T>,
{
    values.map(|v| v.abs()).fold(T::zero(), |acc, a| if a > acc { a } else { acc })
}

fn min_abs<'a, T, I>(values: I) -> T
where
    T: Coefficient + 'a,
    I: Iterator<Item = &'a T>,
{
    values
        .map(|v| v.abs())
        .reduce(|acc, a| if a < acc { a } else { acc })
        .unwrap_or_else(T::zero)
}

impl<T: Coefficient> StaticMatrix<T> {
    /// Largest absolute coefficient in row `i`, zero for an empty row.
    pub fn get_max_abs_in_row(&self, i: usize) -> T {
        max_abs(self.rows[i].iter().map(|c| &c.coeff))
    }

    /// Smallest absolute coefficient in row `i`, zero for an empty row.
    pub fn get_min_abs_in_row(&self, i: usize) -> T {
        min_abs(self.rows[i].iter().map(|c| &c.coeff))
    }

    /// Largest absolute coefficient in column `j`, zero for an empty column.
    pub fn get_max_abs_in_column(&self, j: usize) -> T {
        max_abs(self.column(j).map(|(_, v)| v))
    }

    /// Smallest absolute coefficient in column `j`, zero for an empty column.
    pub fn get_min_abs_in_column(&self, j: usize) -> T {
        min_abs(self.column(j).map(|(_, v)| v))
    }

    /// Sum of the absolute coefficients of row `i`.
    pub fn get_row_balance(&self, i: usize) -> T {
        self.rows[i]
            .iter()
            .filter(|c| !c.coeff.is_zero())
            .fold(T::zero(), |acc, c| acc + c.coeff.abs())
    }

    /// Sum of all row balances.
    pub fn get_balance(&self) -> T {
        (0..self.row_count()).fold(T::zero(), |acc, i| acc + self.get_row_balance(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StaticMatrix<f64> {
        let mut m = StaticMatrix::new(2, 3);
        m.set(0, 0, -4.0);
        m.set(0, 1, 0.5);
        m.set(0, 2, 2.0);
        m.set(1, 0, 3.0);
        m
    }

    #[test]
    fn test_row_extremes() {
        let m = sample();
        assert_eq!(m.get_max_abs_in_row(0), 4.0);
        assert_eq!(m.get_min_abs_in_row(0), 0.5);
        assert_eq!(m.get_max_abs_in_row(1), 3.0);
    }

    #[test]
    fn test_column_extremes() {
        let m = sample();
        assert_eq!(m.get_max_abs_in_column(0), 4.0);
        assert_eq!(m.get_min_abs_in_column(0), 3.0);
        assert_eq!(m.get_min_abs_in_column(2), 2.0);
    }

    #[test]
    fn test_empty_lines_are_zero() {
        let m = StaticMatrix::<i64>::new(1, 1);
        assert_eq!(m.get_max_abs_in_row(0), 0);
        assert_eq!(m.get_min_abs_in_row(0), 0);
        assert_eq!(m.get_min_abs_in_column(0), 0);
    }

    #[test]
    fn test_balance() {
        let m = sample();
        approx::assert_relative_eq!(m.get_row_balance(0), 6.5);
        approx::assert_relative_eq!(m.get_balance(), 9.5);
    }
}
