use std::fmt::Display;

use serde::Serialize;

/// A single Mython token.
///
/// `Indent`, `Dedent` and `Newline` are synthetic: they are derived from the
/// layout of the source rather than from a character sequence of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Decimal integer literal.
    Number(i64),
    /// Identifier.
    Id(String),
    /// String literal with the quotes stripped.
    String(String),
    /// Single punctuation character used as an operator.
    Char(char),
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,
    Newline,
    Indent,
    Dedent,
    Eof,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "Number{{{value}}}"),
            Token::Id(value) => write!(f, "Id{{{value}}}"),
            Token::String(value) => write!(f, "String{{{value}}}"),
            Token::Char(value) => write!(f, "Char{{{value}}}"),
            other => write!(f, "{other:?}"),
        }
    }
}
