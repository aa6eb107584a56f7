use serde::Serialize;

use super::Statement;

/// Sequential execution; an active `return` in any child halts the sequence
/// and bubbles up.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Compound {
    pub statements: Vec<Statement>,
}

impl Compound {
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}
