//! Replaying statements onto a tableau.

use num_rational::BigRational;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::dsl::{Monomial, Statement, SystemAst, VarKind};
use crate::error::{LpError, Result};
use crate::tableau::{Tableau, TableauConfig};
use crate::term::LinearTerm;

/// A tableau whose variables are addressed by name.
#[derive(Debug, Clone)]
pub struct System {
    tableau: Tableau<BigRational>,
    /// Name to external id, for every variable still registered
    names: FxHashMap<String, usize>,
    next_external: usize,
}

impl Default for System {
    fn default() -> Self {
        Self::new(TableauConfig::default())
    }
}

impl System {
    /// Create an empty system.
    pub fn new(config: TableauConfig) -> Self {
        Self {
            tableau: Tableau::new(config),
            names: FxHashMap::default(),
            next_external: 0,
        }
    }

    /// Build a system by replaying every statement of `ast` in order.
    pub fn from_ast(ast: SystemAst, config: TableauConfig) -> Result<Self> {
        let mut system = Self::new(config);
        for statement in &ast.statements {
            system.apply(statement)?;
        }
        info!(
            rows = system.tableau.row_count(),
            columns = system.tableau.var_count(),
            statements = ast.statements.len(),
            "system loaded"
        );
        Ok(system)
    }

    /// The underlying tableau.
    pub fn tableau(&self) -> &Tableau<BigRational> {
        &self.tableau
    }

    /// Column of the variable called `name`, if it is registered.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        let external = *self.names.get(name)?;
        self.tableau.register().external_lookup(external)
    }

    /// Apply a single statement.
    pub fn apply(&mut self, statement: &Statement) -> Result<()> {
        debug!(line = statement.line(), "applying statement");
        match statement {
            Statement::Declare { kind, names, .. } => {
                for name in names {
                    if self.names.contains_key(name) {
                        return Err(LpError::DuplicateDefinition { name: name.clone() });
                    }
                    self.declare(name, *kind == VarKind::Int);
                }
                Ok(())
            }
            Statement::Define { name, terms, .. } => self.define(name, terms),
            Statement::Pivot {
                leaving, entering, ..
            } => {
                let leaving = self.resolve(leaving)?;
                let entering = self.resolve(entering)?;
                self.tableau.pivot(leaving, entering)
            }
            Statement::Push { .. } => {
                self.tableau.push();
                Ok(())
            }
            Statement::Pop { count, .. } => {
                self.tableau.pop(*count)?;
                let register = self.tableau.register();
                self.names.retain(|_, external| register.external_is_used(*external));
                Ok(())
            }
        }
    }

    fn declare(&mut self, name: &str, is_integer: bool) -> usize {
        let external = self.next_external;
        self.next_external += 1;
        self.names.insert(name.to_string(), external);
        self.tableau.add_named_var(external, is_integer, name)
    }

    /// Column of `name`, registering it as a real variable on first use.
    fn column_or_declare(&mut self, name: &str) -> usize {
        match self.column_of(name) {
            Some(j) => j,
            None => self.declare(name, false),
        }
    }

    fn resolve(&self, name: &str) -> Result<usize> {
        self.column_of(name)
            .ok_or_else(|| LpError::unknown_variable(name))
    }

    fn define(&mut self, name: &str, terms: &[Monomial]) -> Result<()> {
        if self.names.contains_key(name) || terms.iter().any(|m| m.var == name) {
            return Err(LpError::DuplicateDefinition {
                name: name.to_string(),
            });
        }

        let mut term = LinearTerm::new();
        for monomial in terms {
            let j = self.column_or_declare(&monomial.var);
            term.add_monomial(j, monomial.coeff.clone());
        }

        let external = self.next_external;
        self.next_external += 1;
        let j = self.tableau.add_definition(external, false, &term)?;
        self.tableau.set_var_name(j, name);
        self.names.insert(name.to_string(), external);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use num_bigint::BigInt;

    fn int(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn load(input: &str) -> Result<System> {
        let config = TableauConfig::new().with_consistency_checks(true);
        System::from_ast(dsl::parse(input)?, config)
    }

    #[test]
    fn test_definitions_are_substituted() {
        let system = load(".int x y\ns = x + 2 y\nt = s - y").unwrap();
        let tableau = system.tableau();
        let x = system.column_of("x").unwrap();
        let y = system.column_of("y").unwrap();
        let t = system.column_of("t").unwrap();

        let row = tableau.row_of(t).unwrap();
        let term = tableau.row_term(row);
        assert_eq!(term.coeff(x), Some(&int(1)));
        assert_eq!(term.coeff(y), Some(&int(1)));
        assert!(tableau.register().local_is_int(x));
        assert!(!tableau.register().local_is_int(t));
    }

    #[test]
    fn test_undeclared_variables_are_real() {
        let system = load("s = a + b").unwrap();
        let a = system.column_of("a").unwrap();
        assert!(!system.tableau().register().local_is_int(a));
        assert_eq!(system.tableau().var_count(), 3);
    }

    #[test]
    fn test_pivot_by_name() {
        let system = load("s = x + y\n.pivot s x").unwrap();
        let tableau = system.tableau();
        let x = system.column_of("x").unwrap();
        let s = system.column_of("s").unwrap();
        assert_eq!(tableau.row_of(x), Some(0));
        assert_eq!(tableau.row_of(s), None);
    }

    #[test]
    fn test_pop_forgets_scoped_names() {
        let system = load("s = x\n.push\nu = x + v\n.pivot s x\n.pop").unwrap();
        assert!(system.column_of("u").is_none());
        assert!(system.column_of("v").is_none());
        let s = system.column_of("s").unwrap();
        assert_eq!(system.tableau().row_of(s), Some(0));
        assert_eq!(system.tableau().row_count(), 1);
    }

    #[test]
    fn test_name_can_be_reused_after_pop() {
        let system = load(".push\nu = x\n.pop\nu = x + x").unwrap();
        let u = system.column_of("u").unwrap();
        let x = system.column_of("x").unwrap();
        let row = system.tableau().row_of(u).unwrap();
        assert_eq!(system.tableau().row_term(row).coeff(x), Some(&int(2)));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            load("s = x\ns = y"),
            Err(LpError::DuplicateDefinition { .. })
        ));
        assert!(matches!(
            load("s = s + x"),
            Err(LpError::DuplicateDefinition { .. })
        ));
        assert!(matches!(
            load("s = x\n.pivot s w"),
            Err(LpError::UnknownVariable { .. })
        ));
        assert!(matches!(load(".pop"), Err(LpError::ScopeUnderflow { .. })));
        assert!(matches!(
            load("s = x\n.pivot x s"),
            Err(LpError::NotBasic { .. })
        ));
    }
}
