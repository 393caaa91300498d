//! Error types for Tabula core.

use thiserror::Error;

use tabula_engine::engine::FormulaError;

/// Errors that can occur while working with a sheet or its collaborators
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        cell: String,
        rows: usize,
        cols: usize,
    },

    #[error("No file path set")]
    NoFilePath,

    #[error("Please enter some data in the spreadsheet first")]
    EmptySheet,

    #[error("Text generation failed: {0}")]
    Generator(String),

    #[error("Slide {0} not found")]
    SlideNotFound(u64),

    #[error("Cannot delete the last slide")]
    LastSlide,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
