use std::{error::Error, fmt::Display};

/// A failure raised while executing a program. All variants abort execution;
/// Mython has no construct for catching them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Reference to an undefined name or a missing instance field.
    NameError(String),
    /// Operator or construct applied to incompatible value types.
    TypeError(String),
    /// Method lookup miss on an instance, parent chain included. Also
    /// covers calls with the wrong number of arguments.
    AttributeError(String),
    DivisionByZero,
    /// The print sink rejected a write.
    OutputError(String),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::NameError(message) => write!(f, "name error: {message}"),
            RuntimeError::TypeError(message) => write!(f, "type error: {message}"),
            RuntimeError::AttributeError(message) => write!(f, "attribute error: {message}"),
            RuntimeError::DivisionByZero => f.write_str("arithmetic error: division by zero"),
            RuntimeError::OutputError(message) => write!(f, "output error: {message}"),
        }
    }
}

impl Error for RuntimeError {}
