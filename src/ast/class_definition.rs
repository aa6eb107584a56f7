use std::rc::Rc;

use serde::Serialize;

use crate::runtime::Class;

/// Exposes the class handle; the parser wraps this in an assignment of the
/// class to its name.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDefinition {
    pub class: Rc<Class>,
}
