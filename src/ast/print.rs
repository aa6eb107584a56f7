use serde::Serialize;

use super::Statement;

/// Print the arguments space-separated, followed by a newline. With no
/// arguments only the newline is emitted.
#[derive(Debug, Clone, Serialize)]
pub struct Print {
    pub args: Vec<Statement>,
}
