//! Tree-walking interpreter for Mython, a small dynamically typed
//! object-oriented scripting language with Python-like surface syntax:
//! significant indentation, `class`/`def`/`if`/`else`/`print`, and
//! single-inheritance classes with dunder-method operator overloading.
pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;

use std::{
    error,
    fmt::Display,
    io::{BufRead, Write},
};

use log::debug;

use crate::{
    interpreter::Interpreter,
    lexer::{LexError, Lexer},
    parser::{ParseError, Parser},
    runtime::{Object, RuntimeError},
};

/// Any failure the pipeline can surface to the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Lex(error) => write!(f, "lex error: {error}"),
            Error::Parse(error) => write!(f, "parse error: {error}"),
            Error::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl error::Error for Error {}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Error::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        match error {
            // A tokenization failure keeps its kind even when the parser
            // was the one driving the lexer.
            ParseError::Lex(lex) => Error::Lex(lex),
            syntax => Error::Parse(syntax),
        }
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Error::Runtime(error)
    }
}

/// Run a Mython program read from `input`, sending `print` output to
/// `output`. Yields the value of the last top-level statement.
pub fn run_program(input: impl BufRead, output: impl Write) -> Result<Object, Error> {
    let lexer = Lexer::new(input)?;
    let program = Parser::new(lexer).parse_program()?;
    debug!("program parsed");

    Interpreter::new(output).run(&program).map_err(Error::from)
}
