//! Spreadsheet engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`CellRef`], [`column_label`], [`cell_address`] - A1 notation ↔ row/col indices
//! - [`CellRange`], [`parse_range`] - Rectangular spans, enumerated row-major
//! - [`CellStore`] - Sparse raw-value storage
//! - [`evaluate`] - Raw cell text to display text, never failing
//! - [`parse_number`], [`format_number`] - Numeric coercion and display

mod cell_ref;
mod error;
mod expr;
mod formula;
mod number;
mod range;
mod store;

pub use cell_ref::{CellRef, cell_address, column_label};
pub use error::{FormulaError, Result};
pub use expr::{MAX_NESTING_DEPTH, evaluate_expression};
pub use formula::{ERROR_MARKER, FORMULA_MARKER, Formula, evaluate, is_formula, try_evaluate};
pub use number::{coerce_number, format_number, parse_number};
pub use range::{CellRange, parse_range};
pub use store::CellStore;
