use serde::Serialize;

use super::{Statement, VariableValue};

/// Mutate a field on the instance that `object` resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct FieldAssignment {
    pub object: VariableValue,
    pub field_name: String,
    pub value: Box<Statement>,
}
