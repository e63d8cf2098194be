//! Abstract Syntax Tree types for the system language.

use num_rational::BigRational;

/// A parsed system description: statements in file order.
#[derive(Debug, Clone, Default)]
pub struct SystemAst {
    /// All statements
    pub statements: Vec<Statement>,
}

impl SystemAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Variable domain declared with `.int` or `.real`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Integer-valued
    Int,
    /// Real-valued
    Real,
}

impl VarKind {
    /// Parse a kind from its directive name (without the dot).
    pub fn from_directive(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "int" => Some(Self::Int),
            "real" => Some(Self::Real),
            _ => None,
        }
    }
}

/// `coeff * var`.
#[derive(Debug, Clone, PartialEq)]
pub struct Monomial {
    /// Coefficient
    pub coeff: BigRational,
    /// Variable name
    pub var: String,
}

/// One line of the system description.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `.int a b` / `.real a b`
    Declare {
        kind: VarKind,
        names: Vec<String>,
        line: usize,
    },
    /// `s = 2 x - 3/4 y`
    Define {
        name: String,
        terms: Vec<Monomial>,
        line: usize,
    },
    /// `.pivot leaving entering`
    Pivot {
        leaving: String,
        entering: String,
        line: usize,
    },
    /// `.push`
    Push { line: usize },
    /// `.pop [count]`
    Pop { count: usize, line: usize },
}

impl Statement {
    /// Source line of the statement.
    pub fn line(&self) -> usize {
        match self {
            Statement::Declare { line, .. }
            | Statement::Define { line, .. }
            | Statement::Pivot { line, .. }
            | Statement::Push { line }
            | Statement::Pop { line, .. } => *line,
        }
    }
}
