use serde::Serialize;

use super::Statement;

#[derive(Debug, Clone, Serialize)]
pub struct Return {
    pub value: Box<Statement>,
}
