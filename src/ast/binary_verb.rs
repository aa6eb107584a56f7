use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryVerb {
    Add,
    Sub,
    Mult,
    Div,
    And,
    Or,
}

impl Display for BinaryVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryVerb::Add => "+",
            BinaryVerb::Sub => "-",
            BinaryVerb::Mult => "*",
            BinaryVerb::Div => "/",
            BinaryVerb::And => "and",
            BinaryVerb::Or => "or",
        })
    }
}
