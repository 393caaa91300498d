//! Formula evaluation: raw cell text in, display text out.
//!
//! Evaluation is one level deep. References and ranges read the raw text of
//! other cells and coerce it to a number; they never evaluate the formulas they
//! find there, so there is no dependency chain to follow and nothing can cycle.

use super::error::{FormulaError, Result};
use super::expr::evaluate_expression;
use super::number::format_number;
use super::range::CellRange;
use super::store::CellStore;
use crate::builtins::{RangeBuiltin, range_builtin, range_fn_re};

/// Leading character that marks raw text as a formula.
pub const FORMULA_MARKER: char = '=';

/// Display value of a formula that failed to evaluate.
pub const ERROR_MARKER: &str = "#ERROR";

/// How the text after the marker will be evaluated.
pub enum Formula<'a> {
    /// The whole formula is a single range call, e.g. `SUM(A1:A5)`.
    Aggregate {
        builtin: &'static RangeBuiltin,
        range: CellRange,
    },
    /// Anything else goes through the arithmetic parser.
    Expression(&'a str),
}

impl<'a> Formula<'a> {
    /// Classify the text after the marker. Aggregate forms are recognized
    /// before the generic path.
    pub fn classify(expr: &'a str) -> Result<Formula<'a>> {
        let Some(caps) = range_fn_re().captures(expr) else {
            return Ok(Formula::Expression(expr));
        };
        let builtin = range_builtin(&caps[1])
            .ok_or_else(|| FormulaError::UnknownFunction(caps[1].to_string()))?;
        let range = CellRange::from_addresses(&caps[2], &caps[3])?;
        Ok(Formula::Aggregate { builtin, range })
    }

    pub fn compute(&self, store: &CellStore) -> Result<f64> {
        let value = match self {
            Formula::Aggregate { builtin, range } => (builtin.apply)(store, range),
            Formula::Expression(expr) => evaluate_expression(expr, store)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NotFinite)
        }
    }
}

pub fn is_formula(raw: &str) -> bool {
    raw.starts_with(FORMULA_MARKER)
}

/// Evaluate raw text without the error boundary.
///
/// Returns `Ok(None)` for literals, which display as themselves.
pub fn try_evaluate(raw: &str, store: &CellStore) -> Result<Option<f64>> {
    let Some(expr) = raw.strip_prefix(FORMULA_MARKER) else {
        return Ok(None);
    };
    Formula::classify(expr)?.compute(store).map(Some)
}

/// Display value for raw cell text.
///
/// Literals pass through unchanged; formulas evaluate to a number or to
/// [`ERROR_MARKER`]. Never fails and never touches the store.
pub fn evaluate(raw: &str, store: &CellStore) -> String {
    match try_evaluate(raw, store) {
        Ok(None) => raw.to_string(),
        Ok(Some(value)) => format_number(value),
        Err(e) => {
            log::debug!("formula {:?} failed: {}", raw, e);
            ERROR_MARKER.to_string()
        }
    }
}
