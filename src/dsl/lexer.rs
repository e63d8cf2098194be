//! Lexer (tokenizer) for the system language.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Num, One};

use crate::error::{LpError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A variable name
    Identifier,
    /// An unsigned integer or decimal literal
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Equals sign '='
    Equals,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*'
    Star,
    /// '/'
    Slash,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing system input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line,
                    column,
                });
            }
        };

        let (kind, text) = match ch {
            '\n' => {
                self.advance();
                (TokenKind::Newline, "\n".to_string())
            }
            '.' => {
                self.advance();
                let name = self.read_identifier();
                if name.is_empty() {
                    return Err(LpError::lexer(line, column, "expected directive name after '.'"));
                }
                (TokenKind::Directive, format!(".{}", name))
            }
            '=' | '+' | '-' | '*' | '/' => {
                self.advance();
                let kind = match ch {
                    '=' => TokenKind::Equals,
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    _ => TokenKind::Slash,
                };
                (kind, ch.to_string())
            }
            '0'..='9' => (TokenKind::Number, self.read_number()),
            _ if ch.is_alphabetic() || ch == '_' => (TokenKind::Identifier, self.read_identifier()),
            _ => {
                return Err(LpError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(Token {
            kind,
            text,
            line,
            column,
        })
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() || (ch == '.' && !seen_dot) {
                seen_dot |= ch == '.';
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

/// Parse an unsigned integer or decimal literal into an exact rational.
///
/// `"0.25"` becomes `1/4`. Exponents are not accepted.
pub fn parse_rational(text: &str) -> Option<BigRational> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let digits = format!("{}{}", int_part, frac_part);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let numer = BigInt::from_str_radix(&digits, 10).ok()?;
    let denom = (0..frac_part.len()).fold(BigInt::one(), |acc, _| acc * BigInt::from(10));
    Some(BigRational::new(numer, denom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_parse_rational() {
        assert_eq!(parse_rational("12"), Some(q(12, 1)));
        assert_eq!(parse_rational("0.25"), Some(q(1, 4)));
        assert_eq!(parse_rational("3."), Some(q(3, 1)));
        assert_eq!(parse_rational("1.50"), Some(q(3, 2)));
        assert_eq!(parse_rational("."), None);
        assert_eq!(parse_rational("1e3"), None);
    }

    #[test]
    fn test_lexer_definition() {
        let mut lexer = Lexer::new("s = 2*x - 3/4 y");
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
            let tok = lexer.next_token().unwrap();
            (tok.kind != TokenKind::Eof).then_some(tok.kind)
        })
        .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
                TokenKind::Star,
                TokenKind::Identifier,
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_lexer_directive_and_comment() {
        let mut lexer = Lexer::new("# header\n.int x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".int");
        assert_eq!(tok.line, 2);
    }

    #[test]
    fn test_lexer_rejects_unknown_character() {
        let mut lexer = Lexer::new("x @ y");
        lexer.next_token().unwrap();
        assert!(matches!(
            lexer.next_token(),
            Err(LpError::LexerError { line: 1, column: 3, .. })
        ));
    }
}
