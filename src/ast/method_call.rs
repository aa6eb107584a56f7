use serde::Serialize;

use super::Statement;

#[derive(Debug, Clone, Serialize)]
pub struct MethodCall {
    pub object: Box<Statement>,
    pub method: String,
    pub args: Vec<Statement>,
}
