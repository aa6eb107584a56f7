use serde::Serialize;

use super::{BinaryVerb, Statement};

#[derive(Debug, Clone, Serialize)]
pub struct BinaryOp {
    pub verb: BinaryVerb,
    pub lhs: Box<Statement>,
    pub rhs: Box<Statement>,
}
