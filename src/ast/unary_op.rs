use serde::Serialize;

use super::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryVerb {
    /// `str(x)`
    Stringify,
    /// `not x`
    Not,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryOp {
    pub verb: UnaryVerb,
    pub operand: Box<Statement>,
}
