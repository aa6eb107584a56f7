use serde::Serialize;

use super::Statement;

/// Bind or rebind a name in the current closure.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub var: String,
    pub value: Box<Statement>,
}
