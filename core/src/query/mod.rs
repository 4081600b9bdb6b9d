//! Boolean query language: `&&`, `||`, `!` and parentheses over terms.

pub mod eval;
pub mod lexer;
pub mod parser;

pub use eval::{complement, evaluate, intersect, run, union, DocSet, Evaluation, PostingSource};
pub use lexer::{Lexeme, Lexer, Token};
pub use parser::{parse, Expr, Op, ParsedQuery, MAX_NESTING};

/// Queries without operator characters take the single-term path.
pub fn is_boolean_query(query: &str) -> bool {
    query.contains(|c: char| matches!(c, '&' | '|' | '!' | '(' | ')'))
}
