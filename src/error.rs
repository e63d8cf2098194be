//! Error types for the lpmat engine.
//!
//! The matrix and register primitives treat index misuse as a contract
//! violation and panic. [`LpError`] covers the fallible surfaces built on top
//! of them: the system description language, tableau operations on named
//! variables, and file I/O.

use thiserror::Error;

/// Result type alias using [`LpError`].
pub type Result<T> = std::result::Result<T, LpError>;

/// Unified error type for all lpmat operations.
#[derive(Error, Debug)]
pub enum LpError {
    // ============ Language Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Malformed numeric literal
    #[error("Invalid number '{text}' at line {line}")]
    InvalidNumber { line: usize, text: String },

    // ============ Model Errors ============
    /// Variable name never declared or defined
    #[error("Unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// A basic variable was defined twice
    #[error("Variable '{name}' is already defined")]
    DuplicateDefinition { name: String },

    /// Pivot requested on a variable that does not own a row
    #[error("Variable '{name}' is not basic")]
    NotBasic { name: String },

    /// Pivot requested with an entering variable that already owns a row
    #[error("Variable '{name}' is already basic")]
    AlreadyBasic { name: String },

    /// The entering variable does not occur in the basic variable's row
    #[error("Cannot pivot '{basic}' with '{entering}': coefficient is zero")]
    ZeroPivot { basic: String, entering: String },

    /// More scopes popped than were pushed
    #[error("Cannot pop {requested} scope(s), only {available} open")]
    ScopeUnderflow { requested: usize, available: usize },

    // ============ Consistency Errors ============
    /// The row/column cross-index check failed
    #[error("Inconsistent matrix: {message}")]
    InconsistentMatrix { message: String },

    // ============ I/O Errors ============
    /// Error reading a system file
    #[error("Failed to read system file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LpError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown variable error
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }
}
