use std::collections::HashMap;

use super::{Object, RuntimeError};

/// Name → value mapping. One closure serves as the global scope, a fresh one
/// is built per method call, and every instance owns one as its field store.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    variables: HashMap<String, Object>,
}

impl Closure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a name up, yielding nothing when it was never bound.
    pub fn get(&self, name: &str) -> Option<&Object> {
        self.variables.get(name)
    }

    /// Look a name up, raising a name error when it was never bound.
    pub fn get_or_error(&self, name: &str) -> Result<&Object, RuntimeError> {
        self.get(name)
            .ok_or_else(|| RuntimeError::NameError(format!("name '{name}' is not defined")))
    }

    /// Bind or rebind a name.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.variables.insert(name.into(), value);
    }
}
