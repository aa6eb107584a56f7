use serde::Serialize;

use super::Statement;

#[derive(Debug, Clone, Serialize)]
pub struct IfElse {
    pub condition: Box<Statement>,
    pub if_body: Box<Statement>,
    pub else_body: Option<Box<Statement>>,
}
