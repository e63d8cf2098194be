//! The tableau driver.

use tracing::{debug, trace};

use super::TableauConfig;
use crate::error::{LpError, Result};
use crate::matrix::StaticMatrix;
use crate::numeric::Coefficient;
use crate::register::{VarRegister, NO_EXTERNAL};
use crate::term::LinearTerm;

/// A basis exchange made inside an open scope.
#[derive(Debug, Clone, Copy)]
struct PivotRecord {
    leaving: usize,
    entering: usize,
}

/// Sizes recorded when a scope was opened.
#[derive(Debug, Clone, Copy)]
struct ScopeMark {
    rows: usize,
    columns: usize,
    trail_len: usize,
}

/// Sparse tableau in solved form over registered variables.
///
/// Basis exchanges divide by arbitrary pivot coefficients, so `T` needs
/// field division: `BigRational` or `Rational64` for exact results, `f64`
/// for rounded ones. Machine integers truncate and are not supported here.
#[derive(Debug, Clone)]
pub struct Tableau<T> {
    matrix: StaticMatrix<T>,
    register: VarRegister,
    /// Per column: the row defining it, `None` while nonbasic.
    basis_heading: Vec<Option<usize>>,
    /// Per row: its basic column.
    row_basic: Vec<usize>,
    trail: Vec<PivotRecord>,
    scopes: Vec<ScopeMark>,
    config: TableauConfig,
}

impl<T: Coefficient> Default for Tableau<T> {
    fn default() -> Self {
        Self::new(TableauConfig::default())
    }
}

impl<T: Coefficient> Tableau<T> {
    /// Create an empty tableau.
    pub fn new(config: TableauConfig) -> Self {
        Self {
            matrix: StaticMatrix::with_capacity(config.row_capacity, config.column_capacity),
            register: VarRegister::new(),
            basis_heading: Vec::with_capacity(config.column_capacity),
            row_basic: Vec::with_capacity(config.row_capacity),
            trail: Vec::new(),
            scopes: Vec::new(),
            config,
        }
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &StaticMatrix<T> {
        &self.matrix
    }

    /// The variable register.
    pub fn register(&self) -> &VarRegister {
        &self.register
    }

    /// Per column: the row defining it, `None` while nonbasic.
    pub fn basis_heading(&self) -> &[Option<usize>] {
        &self.basis_heading
    }

    /// Basic column of `row`.
    pub fn basic_var(&self, row: usize) -> usize {
        self.row_basic[row]
    }

    /// Row defining `j`, if `j` is basic.
    pub fn row_of(&self, j: usize) -> Option<usize> {
        self.basis_heading.get(j).copied().flatten()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.register.size()
    }

    /// Number of open scopes.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Name of `j`, or `x<j>` if it has none.
    pub fn var_name(&self, j: usize) -> String {
        match self.register.get_name(j) {
            "" => format!("x{j}"),
            name => name.to_string(),
        }
    }

    /// Register a variable and return its column.
    ///
    /// Registering an external id twice returns the existing column.
    pub fn add_var(&mut self, external: usize, is_integer: bool) -> usize {
        let j = self.register.add_var(external, is_integer);
        if j == self.matrix.column_count() {
            self.matrix.add_column();
            self.basis_heading.push(None);
        }
        j
    }

    /// Register a named variable and return its column.
    pub fn add_named_var(&mut self, external: usize, is_integer: bool, name: impl Into<String>) -> usize {
        let j = self.add_var(external, is_integer);
        self.register.set_name(j, name);
        j
    }

    /// Rename column `j`.
    pub fn set_var_name(&mut self, j: usize, name: impl Into<String>) {
        self.register.set_name(j, name);
    }

    /// Define a new basic variable `x_b = term` and return its column.
    ///
    /// Basic variables in `term` are substituted by their rows, so the new
    /// row mentions nonbasic columns only.
    pub fn add_definition(&mut self, external: usize, is_integer: bool, term: &LinearTerm<T>) -> Result<usize> {
        if external != NO_EXTERNAL && self.register.external_is_used(external) {
            let j = self.register.external_to_local(external);
            return Err(LpError::DuplicateDefinition {
                name: self.var_name(j),
            });
        }
        if let Some(j) = term.max_column() {
            if j >= self.matrix.column_count() {
                return Err(LpError::unknown_variable(format!("x{j}")));
            }
        }

        let bj = self.add_var(external, is_integer);
        self.matrix.add_row();
        let row = self.matrix.row_count() - 1;
        self.matrix
            .fill_last_row_with_pivoting(term, bj, &self.basis_heading);
        self.basis_heading[bj] = Some(row);
        self.row_basic.push(bj);
        trace!(row, basic = bj, terms = term.len(), "definition added");

        self.check()?;
        Ok(bj)
    }

    /// Exchange basic `leaving` with nonbasic `entering`.
    ///
    /// The row of `leaving` is rescaled so that `entering` has coefficient
    /// one, then `entering` is eliminated from every other row.
    pub fn pivot(&mut self, leaving: usize, entering: usize) -> Result<()> {
        let row = self.row_of(leaving).ok_or_else(|| LpError::NotBasic {
            name: self.var_name(leaving),
        })?;
        if entering >= self.matrix.column_count() {
            return Err(LpError::unknown_variable(format!("x{entering}")));
        }
        if self.row_of(entering).is_some() {
            return Err(LpError::AlreadyBasic {
                name: self.var_name(entering),
            });
        }
        if self.matrix.get_elem(row, entering).is_zero() {
            return Err(LpError::ZeroPivot {
                basic: self.var_name(leaving),
                entering: self.var_name(entering),
            });
        }

        self.exchange(row, leaving, entering);
        if !self.scopes.is_empty() {
            self.trail.push(PivotRecord { leaving, entering });
        }
        self.check()
    }

    fn exchange(&mut self, row: usize, leaving: usize, entering: usize) {
        debug!(
            leaving = %self.var_name(leaving),
            entering = %self.var_name(entering),
            row,
            "basis exchange"
        );
        let pivot = self.matrix.get_elem(row, entering);
        self.matrix.divide_row(row, &pivot);

        while let Some(cell) = self
            .matrix
            .column_cells(entering)
            .iter()
            .copied()
            .find(|c| c.row() != row)
        {
            self.matrix.pivot_row_to_row_given_cell(row, cell, entering);
        }

        self.basis_heading[leaving] = None;
        self.basis_heading[entering] = Some(row);
        self.row_basic[row] = entering;
    }

    /// Open a scope.
    pub fn push(&mut self) {
        self.scopes.push(ScopeMark {
            rows: self.matrix.row_count(),
            columns: self.matrix.column_count(),
            trail_len: self.trail.len(),
        });
        self.matrix.push();
    }

    /// Close the last `k` scopes.
    ///
    /// Basis exchanges made inside them are undone by exchanging back, then
    /// rows and variables added inside them are dropped. Older rows come
    /// back exactly for exact coefficient types; with `f64` they carry the
    /// rounding of both exchanges.
    pub fn pop(&mut self, k: usize) -> Result<()> {
        if k > self.scopes.len() {
            return Err(LpError::ScopeUnderflow {
                requested: k,
                available: self.scopes.len(),
            });
        }
        for _ in 0..k {
            let Some(mark) = self.scopes.pop() else {
                break;
            };
            while self.trail.len() > mark.trail_len {
                if let Some(record) = self.trail.pop() {
                    if let Some(row) = self.row_of(record.entering) {
                        self.exchange(row, record.entering, record.leaving);
                    }
                }
            }
            self.matrix.pop(1);
            self.register.shrink(mark.columns);
            self.basis_heading.truncate(mark.columns);
            self.row_basic.truncate(mark.rows);
            debug!(
                depth = self.scopes.len(),
                rows = mark.rows,
                columns = mark.columns,
                "tableau scope popped"
            );
        }
        self.check()
    }

    /// The row defining `basic_var(row)` as a term over nonbasic columns.
    pub fn row_term(&self, row: usize) -> LinearTerm<T> {
        let basic = self.row_basic[row];
        let scale = self.matrix.get_elem(row, basic);
        self.matrix
            .row(row)
            .iter()
            .filter(|c| c.column() != basic)
            .map(|c| (c.column(), -(c.coeff().clone() / scale.clone())))
            .collect()
    }

    /// Value of `row` under `assignment`; zero when the assignment satisfies
    /// it.
    pub fn value_of_row(&self, row: usize, assignment: &[T]) -> T {
        self.matrix.dot_product_with_row(row, assignment)
    }

    /// Complete an assignment of the nonbasic columns by computing every
    /// basic column from its row.
    pub fn solve_basics(&self, assignment: &mut [T]) {
        for row in 0..self.row_count() {
            let basic = self.row_basic[row];
            assignment[basic] = self.row_term(row).eval(assignment);
        }
    }

    fn check(&self) -> Result<()> {
        if !self.config.check_consistency {
            return Ok(());
        }
        match self.matrix.find_inconsistency() {
            Some(message) => Err(LpError::InconsistentMatrix { message }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use num_traits::Zero;

    fn int(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn checked() -> Tableau<BigRational> {
        Tableau::new(TableauConfig::new().with_consistency_checks(true))
    }

    /// x, y nonbasic; s = x + 2y; t = s - y.
    fn sample() -> (Tableau<BigRational>, [usize; 4]) {
        let mut t = checked();
        let x = t.add_named_var(0, false, "x");
        let y = t.add_named_var(1, true, "y");
        let s_term: LinearTerm<_> = [(x, int(1)), (y, int(2))].into_iter().collect();
        let s = t.add_definition(2, false, &s_term).unwrap();
        let t_term: LinearTerm<_> = [(s, int(1)), (y, int(-1))].into_iter().collect();
        let u = t.add_definition(3, false, &t_term).unwrap();
        (t, [x, y, s, u])
    }

    #[test]
    fn test_definition_substitutes_basics() {
        let (t, [x, y, s, u]) = sample();
        assert_eq!(t.row_of(s), Some(0));
        assert_eq!(t.row_of(u), Some(1));
        // u = s - y = x + y
        let term = t.row_term(1);
        assert_eq!(term.coeff(x), Some(&int(1)));
        assert_eq!(term.coeff(y), Some(&int(1)));
        assert_eq!(term.coeff(s), None);
    }

    #[test]
    fn test_pivot_keeps_solved_form() {
        let (mut t, [x, y, s, u]) = sample();
        t.pivot(s, x).unwrap();

        assert_eq!(t.row_of(x), Some(0));
        assert_eq!(t.row_of(s), None);
        // x = s - 2y, u = x + y = s - y
        let row_x = t.row_term(0);
        assert_eq!(row_x.coeff(s), Some(&int(1)));
        assert_eq!(row_x.coeff(y), Some(&int(-2)));
        let row_u = t.row_term(1);
        assert_eq!(row_u.coeff(s), Some(&int(1)));
        assert_eq!(row_u.coeff(y), Some(&int(-1)));
        assert_eq!(row_u.coeff(x), None);

        let mut assignment = vec![int(0), int(3), int(10), int(0)];
        t.solve_basics(&mut assignment);
        assert_eq!(assignment[x], int(4));
        assert_eq!(assignment[u], int(7));
        for row in 0..t.row_count() {
            assert!(t.value_of_row(row, &assignment).is_zero());
        }
    }

    #[test]
    fn test_pivot_errors() {
        let (mut t, [x, y, s, _]) = sample();
        assert!(matches!(t.pivot(x, y), Err(LpError::NotBasic { .. })));
        t.pivot(s, x).unwrap();
        assert!(matches!(t.pivot(x, x), Err(LpError::AlreadyBasic { .. })));

        let z = t.add_named_var(9, false, "z");
        assert!(matches!(t.pivot(x, z), Err(LpError::ZeroPivot { .. })));
    }

    #[test]
    fn test_duplicate_definition() {
        let (mut t, [x, _, _, _]) = sample();
        let term: LinearTerm<_> = [(x, int(1))].into_iter().collect();
        assert!(matches!(
            t.add_definition(0, false, &term),
            Err(LpError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_pop_reverts_pivots_and_growth() {
        let (mut t, [x, y, s, _]) = sample();
        let before = t.matrix().clone();

        t.push();
        t.pivot(s, x).unwrap();
        let w = t.add_named_var(20, false, "w");
        let v_term: LinearTerm<_> = [(w, int(1)), (y, int(3))].into_iter().collect();
        t.add_definition(21, false, &v_term).unwrap();
        assert_eq!(t.row_count(), 3);

        t.pop(1).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.var_count(), 4);
        assert_eq!(t.row_of(s), Some(0));
        assert_eq!(t.row_of(x), None);
        assert!(!t.register().external_is_used(20));
        assert_eq!(t.matrix().get_domain(), before.get_domain());
        for row in 0..2 {
            for j in 0..4 {
                assert_eq!(t.matrix().get_elem(row, j), before.get_elem(row, j));
            }
        }
    }

    #[test]
    fn test_pop_underflow() {
        let mut t: Tableau<f64> = Tableau::default();
        t.push();
        assert!(matches!(
            t.pop(2),
            Err(LpError::ScopeUnderflow {
                requested: 2,
                available: 1
            })
        ));
        assert!(t.pop(1).is_ok());
    }

    #[test]
    fn test_machine_rational_pivot_keeps_definition() {
        use num_rational::Rational64;

        let r = Rational64::from_integer;
        let mut t: Tableau<Rational64> = Tableau::new(TableauConfig::new().with_consistency_checks(true));
        let x = t.add_var(0, false);
        let y = t.add_var(1, false);
        let term: LinearTerm<_> = [(x, r(2)), (y, r(1))].into_iter().collect();
        let s = t.add_definition(2, false, &term).unwrap();
        t.pivot(s, x).unwrap();

        // x = s/2 - y/2
        let row_x = t.row_term(0);
        assert_eq!(row_x.coeff(s), Some(&Rational64::new(1, 2)));
        assert_eq!(row_x.coeff(y), Some(&Rational64::new(-1, 2)));

        let mut assignment = vec![r(0), r(1), r(3)];
        t.solve_basics(&mut assignment);
        assert_eq!(assignment[x], r(1));
        assert_eq!(assignment[s], term.eval(&assignment));
    }

    #[test]
    fn test_floating_pop_restores_up_to_rounding() {
        let mut t: Tableau<f64> = Tableau::default();
        let x = t.add_var(0, false);
        let y = t.add_var(1, false);
        let term: LinearTerm<f64> = [(x, 3.0), (y, -7.0)].into_iter().collect();
        let s = t.add_definition(2, false, &term).unwrap();
        let before = t.matrix().clone();

        t.push();
        t.pivot(s, y).unwrap();
        t.pop(1).unwrap();

        assert_eq!(t.row_of(s), Some(0));
        assert_eq!(t.matrix().get_domain(), before.get_domain());
        for j in 0..3 {
            approx::assert_relative_eq!(t.matrix().get_elem(0, j), before.get_elem(0, j), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_floating_tableau() {
        let mut t: Tableau<f64> = Tableau::default();
        let a = t.add_var(0, false);
        let b = t.add_var(1, false);
        let term: LinearTerm<f64> = [(a, 0.5), (b, -2.0)].into_iter().collect();
        let s = t.add_definition(NO_EXTERNAL, false, &term).unwrap();
        t.pivot(s, b).unwrap();

        let mut assignment = vec![4.0, 0.0, 1.0];
        t.solve_basics(&mut assignment);
        approx::assert_relative_eq!(assignment[b], 0.5);
        approx::assert_abs_diff_eq!(t.value_of_row(0, &assignment), 0.0);
    }
}
