//! Parser for the system language.

use num_rational::BigRational;
use num_traits::{One, Zero};

use super::ast::*;
use super::lexer::{parse_rational, Lexer, Token, TokenKind};
use crate::error::{LpError, Result};

/// Parser for system descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire system description.
    pub fn parse(&mut self) -> Result<SystemAst> {
        let mut ast = SystemAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let statement = match self.current.kind {
                TokenKind::Directive => self.parse_directive()?,
                TokenKind::Identifier => self.parse_definition()?,
                _ => {
                    return Err(LpError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            };
            ast.statements.push(statement);

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(LpError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(LpError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn parse_directive(&mut self) -> Result<Statement> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let name = directive.trim_start_matches('.');
        if let Some(kind) = VarKind::from_directive(name) {
            let mut names = Vec::new();
            while !self.at_line_end() {
                names.push(self.expect(TokenKind::Identifier)?.text);
            }
            if names.is_empty() {
                return Err(LpError::parse(line, format!("{} needs at least one variable", directive)));
            }
            return Ok(Statement::Declare { kind, names, line });
        }

        match name.to_ascii_lowercase().as_str() {
            "pivot" => {
                let leaving = self.expect(TokenKind::Identifier)?.text;
                let entering = self.expect(TokenKind::Identifier)?.text;
                Ok(Statement::Pivot {
                    leaving,
                    entering,
                    line,
                })
            }
            "push" => Ok(Statement::Push { line }),
            "pop" => {
                let count = if self.current.kind == TokenKind::Number {
                    let text = self.expect(TokenKind::Number)?.text;
                    text.parse::<usize>()
                        .map_err(|_| LpError::InvalidNumber { line, text })?
                } else {
                    1
                };
                Ok(Statement::Pop { count, line })
            }
            _ => Err(LpError::parse(line, format!("unknown directive: {}", directive))),
        }
    }

    fn parse_definition(&mut self) -> Result<Statement> {
        let name = self.expect(TokenKind::Identifier)?.text;
        let line = self.current.line;
        self.expect(TokenKind::Equals)?;

        let mut terms = Vec::new();
        let mut negate = match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                true
            }
            TokenKind::Plus => {
                self.advance()?;
                false
            }
            _ => false,
        };

        loop {
            let mut monomial = self.parse_monomial(line)?;
            if negate {
                monomial.coeff = -monomial.coeff;
            }
            terms.push(monomial);

            negate = match self.current.kind {
                TokenKind::Plus => false,
                TokenKind::Minus => true,
                _ => break,
            };
            self.advance()?;
        }

        Ok(Statement::Define { name, terms, line })
    }

    fn parse_monomial(&mut self, line: usize) -> Result<Monomial> {
        let coeff = if self.current.kind == TokenKind::Number {
            let coeff = self.parse_coefficient(line)?;
            if self.current.kind == TokenKind::Star {
                self.advance()?;
            }
            coeff
        } else {
            BigRational::one()
        };

        if self.current.kind != TokenKind::Identifier {
            return Err(LpError::parse(
                line,
                "expected a variable; constant terms are not supported",
            ));
        }
        let var = self.expect(TokenKind::Identifier)?.text;
        Ok(Monomial { coeff, var })
    }

    fn parse_coefficient(&mut self, line: usize) -> Result<BigRational> {
        let numer = self.parse_number(line)?;
        if self.current.kind != TokenKind::Slash {
            return Ok(numer);
        }
        self.advance()?;
        let denom = self.parse_number(line)?;
        if denom.is_zero() {
            return Err(LpError::parse(line, "division by zero in coefficient"));
        }
        Ok(numer / denom)
    }

    fn parse_number(&mut self, line: usize) -> Result<BigRational> {
        let text = self.expect(TokenKind::Number)?.text;
        parse_rational(&text).ok_or(LpError::InvalidNumber { line, text })
    }
}
