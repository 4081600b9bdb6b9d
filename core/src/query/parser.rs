//! Recursive-descent parser for boolean queries.
//!
//! ```text
//! Expression := Term ( ('&&' | '||') Term )*
//! Term       := '!'? Factor
//! Factor     := TERM | '(' Expression ')'
//! ```
//!
//! `&&` and `||` share one precedence level and associate left to right, so
//! an expression is kept as a flat chain folded in order. Syntax errors are
//! recorded instead of aborting: the broken factor becomes [`Expr::Invalid`],
//! which matches no documents.

use super::lexer::{Lexeme, Lexer, Token};
use crate::error::QueryError;

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Term(String),
    /// `first op1 e1 op2 e2 ...`, applied left to right.
    Chain(Box<Expr>, Vec<(Op, Expr)>),
    Not(Box<Expr>),
    Group(Box<Expr>),
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub expr: Expr,
    pub errors: Vec<QueryError>,
}

pub fn parse(input: &str) -> ParsedQuery {
    let mut parser = Parser::new(input);
    let expr = parser.expression();
    if parser.current.token != Token::End {
        // the grammar stops at the first token that cannot continue an expression
        parser.errors.push(QueryError::TrailingInput {
            found: parser.current.token.to_string(),
            position: parser.current.position,
        });
    }
    ParsedQuery { expr, errors: parser.errors }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Lexeme,
    errors: Vec<QueryError>,
    depth: usize,
    // set once nesting overflowed; the rest of the input has been discarded
    abandoned: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current, errors: Vec::new(), depth: 0, abandoned: false }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn expression(&mut self) -> Expr {
        let first = self.term();
        let mut rest = Vec::new();
        loop {
            let op = match self.current.token {
                Token::And => Op::And,
                Token::Or => Op::Or,
                _ => break,
            };
            self.advance();
            rest.push((op, self.term()));
        }
        if rest.is_empty() {
            first
        } else {
            Expr::Chain(Box::new(first), rest)
        }
    }

    fn term(&mut self) -> Expr {
        if self.current.token == Token::Not {
            self.advance();
            return Expr::Not(Box::new(self.factor()));
        }
        self.factor()
    }

    // Errors leave the offending token in place so the caller can resync on it.
    fn factor(&mut self) -> Expr {
        match &self.current.token {
            Token::LeftParen if self.depth == MAX_NESTING => {
                self.errors.push(QueryError::TooDeep { position: self.current.position });
                self.abandoned = true;
                while self.current.token != Token::End {
                    self.advance();
                }
                Expr::Invalid
            }
            Token::LeftParen => {
                self.advance();
                self.depth += 1;
                let inner = self.expression();
                self.depth -= 1;
                if self.current.token != Token::RightParen {
                    if !self.abandoned {
                        self.errors.push(QueryError::MissingRightParen { position: self.current.position });
                    }
                    return Expr::Invalid;
                }
                self.advance();
                Expr::Group(Box::new(inner))
            }
            Token::Term(t) => {
                let term = Expr::Term(t.clone());
                self.advance();
                term
            }
            other => {
                if !self.abandoned {
                    self.errors.push(QueryError::UnexpectedToken {
                        found: other.to_string(),
                        position: self.current.position,
                    });
                }
                Expr::Invalid
            }
        }
    }
}
