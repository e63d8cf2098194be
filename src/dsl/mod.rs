//! Line-oriented language for describing tableau systems.
//!
//! A system file declares variables, defines basic variables as linear terms
//! over other variables, and replays basis exchanges and scopes.
//!
//! # Grammar Overview
//!
//! ```text
//! system     = { line }
//! line       = comment | directive | definition | empty
//! comment    = ('#' | ';') { any_char }
//! directive  = ".int" ident+ | ".real" ident+
//!            | ".pivot" ident ident | ".push" | ".pop" [integer]
//! definition = ident '=' ['+' | '-'] term { ('+' | '-') term }
//! term       = [coeff ['*']] ident
//! coeff      = number ['/' number]
//! number     = digit+ ['.' digit*]
//! ident      = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! Coefficients are exact rationals. Variables never declared are real.
//!
//! # Example
//!
//! ```text
//! .int x y
//! s = x + 2 y
//! t = s - 1/2 y
//! .push
//! .pivot s x
//! .pop
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_rational, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a system description string into an AST.
pub fn parse(input: &str) -> Result<SystemAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a system description file.
pub fn parse_file(path: &std::path::Path) -> Result<SystemAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::LpError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
