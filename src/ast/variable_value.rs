use serde::Serialize;

/// A read of `a.b.c`: the first id resolves in the current closure, every
/// further id drills into instance fields. Never empty.
#[derive(Debug, Clone, Serialize)]
pub struct VariableValue {
    pub dotted_ids: Vec<String>,
}
