//! Lexer for boolean query strings.
//!
//! `&&`, `||`, `!`, `(` and `)` are operators; any other run of
//! non-whitespace characters is a term. A lone `&` or `|` is dropped.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(t) => write!(f, "term '{t}'"),
            Token::And => f.write_str("'&&'"),
            Token::Or => f.write_str("'||'"),
            Token::Not => f.write_str("'!'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::End => f.write_str("end of query"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub position: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '!' | '&' | '|')
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str { &self.input[self.position..] }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    fn read_term(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        self.position += end;
        &rest[..end]
    }

    /// Next token; returns `End` forever once the input is exhausted.
    pub fn next_token(&mut self) -> Lexeme {
        loop {
            self.skip_whitespace();
            let start = self.position;
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                return Lexeme { token: Token::End, position: start };
            };
            let token = match c {
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '!' => Token::Not,
                '&' if rest.starts_with("&&") => Token::And,
                '|' if rest.starts_with("||") => Token::Or,
                '&' | '|' => {
                    self.position += 1;
                    continue;
                }
                _ => {
                    let term = self.read_term();
                    return Lexeme { token: Token::Term(term.to_owned()), position: start };
                }
            };
            self.position += match token {
                Token::And | Token::Or => 2,
                _ => 1,
            };
            return Lexeme { token, position: start };
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    /// Yields every token up to, but not including, `End`.
    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.next_token();
        (lexeme.token != Token::End).then_some(lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input).map(|l| l.token).collect()
    }

    fn term(t: &str) -> Token { Token::Term(t.to_owned()) }

    #[test]
    fn operators_and_terms() {
        assert_eq!(
            tokens("кот && (собака||птица) !рыба"),
            vec![
                term("кот"),
                Token::And,
                Token::LeftParen,
                term("собака"),
                Token::Or,
                term("птица"),
                Token::RightParen,
                Token::Not,
                term("рыба"),
            ]
        );
    }

    #[test]
    fn single_ampersand_and_pipe_are_dropped() {
        assert_eq!(tokens("a & b | c"), vec![term("a"), term("b"), term("c")]);
        assert_eq!(tokens("a&b"), vec![term("a"), term("b")]);
        assert_eq!(tokens("&&&"), vec![Token::And]);
    }

    #[test]
    fn positions_are_byte_offsets() {
        let lexemes: Vec<_> = Lexer::new("  ab || ё").collect();
        let positions: Vec<_> = lexemes.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![2, 5, 8]);
    }

    #[test]
    fn end_is_sticky() {
        let mut lexer = Lexer::new("   ");
        assert_eq!(lexer.next_token().token, Token::End);
        assert_eq!(lexer.next_token().token, Token::End);
    }
}
