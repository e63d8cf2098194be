//! Property-based tests for the tableau driver.
//!
//! Random definitions are added over a handful of base variables and random
//! basis exchanges are applied. Whatever the basis, completing any assignment
//! of the nonbasic variables must satisfy every original definition.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

use lpmat_core::{LinearTerm, Tableau, TableauConfig};

// ============================================================================
// Helper functions
// ============================================================================

fn q(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

const BASE_VARS: usize = 4;

/// A definition as (coefficient, index into the variables defined so far).
type Definition = Vec<(i64, usize)>;

fn definition_strategy() -> impl Strategy<Value = Definition> {
    prop::collection::vec(
        (prop::sample::select(vec![-3i64, -2, -1, 1, 2, 3]), 0usize..64),
        1..4,
    )
}

fn checked() -> Tableau<BigRational> {
    Tableau::new(TableauConfig::new().with_consistency_checks(true))
}

/// Build a tableau and return it with every definition as (basic, term).
fn build(defs: &[Definition]) -> (Tableau<BigRational>, Vec<(usize, LinearTerm<BigRational>)>) {
    let mut t = checked();
    for e in 0..BASE_VARS {
        t.add_var(e, false);
    }
    let mut defined = Vec::new();
    for (n, def) in defs.iter().enumerate() {
        let available = t.var_count();
        let term: LinearTerm<BigRational> = def
            .iter()
            .map(|&(c, j)| (j % available, q(c)))
            .collect();
        let basic = t
            .add_definition(BASE_VARS + n, false, &term)
            .expect("fresh definition");
        defined.push((basic, term));
    }
    (t, defined)
}

/// Pick the `choice`-th nonbasic column of `row`, if any.
fn entering_candidate(t: &Tableau<BigRational>, row: usize, choice: usize) -> Option<usize> {
    let basic = t.basic_var(row);
    let candidates: Vec<usize> = t
        .matrix()
        .row(row)
        .iter()
        .map(|c| c.column())
        .filter(|&j| j != basic)
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[choice % candidates.len()])
    }
}

fn assert_definitions_hold(
    t: &Tableau<BigRational>,
    defined: &[(usize, LinearTerm<BigRational>)],
    seed: &[i64],
) -> Result<(), TestCaseError> {
    let mut assignment: Vec<BigRational> = (0..t.var_count())
        .map(|j| q(seed[j % seed.len()]))
        .collect();
    t.solve_basics(&mut assignment);
    for row in 0..t.row_count() {
        prop_assert!(t.value_of_row(row, &assignment).is_zero());
    }
    for (basic, term) in defined {
        prop_assert_eq!(&assignment[*basic], &term.eval(&assignment));
    }
    Ok(())
}

// ============================================================================
// Tableau property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_definitions_hold_after_pivots(
        defs in prop::collection::vec(definition_strategy(), 1..6),
        pivots in prop::collection::vec((0usize..16, 0usize..16), 0..8),
        seed in prop::collection::vec(-4i64..=4, 1..8),
    ) {
        let (mut t, defined) = build(&defs);
        assert_definitions_hold(&t, &defined, &seed)?;

        for (row, choice) in pivots {
            let row = row % t.row_count();
            let Some(entering) = entering_candidate(&t, row, choice) else {
                continue;
            };
            let leaving = t.basic_var(row);
            t.pivot(leaving, entering).expect("pivot on a nonzero entry");
            prop_assert_eq!(t.row_of(entering), Some(row));
            prop_assert_eq!(t.row_of(leaving), None);
            assert_definitions_hold(&t, &defined, &seed)?;
        }
    }

    #[test]
    fn prop_pop_restores_matrix(
        defs in prop::collection::vec(definition_strategy(), 1..5),
        scoped in prop::collection::vec(definition_strategy(), 0..4),
        pivots in prop::collection::vec((0usize..16, 0usize..16), 0..6),
    ) {
        let (mut t, _) = build(&defs);
        let before = t.matrix().clone();
        let heading = t.basis_heading().to_vec();
        let vars = t.var_count();

        t.push();
        for (n, def) in scoped.iter().enumerate() {
            let available = t.var_count();
            let term: LinearTerm<BigRational> = def
                .iter()
                .map(|&(c, j)| (j % available, q(c)))
                .collect();
            t.add_definition(1000 + n, false, &term).expect("fresh definition");
        }
        for (row, choice) in pivots {
            let row = row % t.row_count();
            if let Some(entering) = entering_candidate(&t, row, choice) {
                let leaving = t.basic_var(row);
                t.pivot(leaving, entering).expect("pivot on a nonzero entry");
            }
        }
        t.pop(1).expect("one open scope");

        prop_assert_eq!(t.var_count(), vars);
        prop_assert_eq!(t.basis_heading(), heading.as_slice());
        prop_assert_eq!(t.matrix().get_domain(), before.get_domain());
        for i in 0..before.row_count() {
            for j in 0..before.column_count() {
                prop_assert_eq!(t.matrix().get_elem(i, j), before.get_elem(i, j));
            }
        }
    }
}
