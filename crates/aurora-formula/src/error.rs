//! Errors raised while parsing or evaluating formulas.
//!
//! Tokenizing never fails; parsing and evaluation can.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("formula expression is empty")]
    Empty,
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: &'static str,
        got: usize,
    },
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
