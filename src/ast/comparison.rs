use serde::Serialize;

use super::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareVerb {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub verb: CompareVerb,
    pub lhs: Box<Statement>,
    pub rhs: Box<Statement>,
}
