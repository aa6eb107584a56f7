use std::rc::Rc;

use serde::Serialize;

use crate::runtime::Class;

use super::Statement;

/// Instantiate `class`, running its `__init__` when one with a matching
/// parameter count exists.
#[derive(Debug, Clone, Serialize)]
pub struct NewInstance {
    pub class: Rc<Class>,
    pub args: Vec<Statement>,
}
