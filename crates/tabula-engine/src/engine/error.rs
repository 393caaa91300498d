//! Formula evaluation errors.
//!
//! None of these ever reach the caller of [`super::evaluate`]; they are
//! collapsed into the error marker there. They exist so the pieces below the
//! error boundary can use `?` and so tests can assert on the exact failure.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Range {0} covers too many cells")]
    RangeTooLarge(String),

    #[error("Unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected token {0}")]
    UnexpectedToken(String),

    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Formula nests deeper than {0} levels")]
    TooDeep(usize),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NotFinite,
}

pub type Result<T> = std::result::Result<T, FormulaError>;
