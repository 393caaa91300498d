//! Built-in range aggregates and their metadata.
//!
//! Conventions:
//! - Sheet-facing built-in names are ALL CAPS (`SUM`, `AVERAGE`) and matched
//!   case-insensitively.
//! - Aggregates read the *raw* text of each cell in the range. Formulas found
//!   inside a range are never evaluated, only coerced from their literal text.
//! - If you add a new range built-in, add it to `RANGE_BUILTINS`; both the
//!   whole-formula fast path and the expression parser pick it up from there.

use regex::Regex;
use std::sync::OnceLock;

use crate::engine::{CellRange, CellStore, parse_number};

pub struct RangeBuiltin {
    pub sheet_name: &'static str,
    pub description: &'static str,
    pub apply: fn(&CellStore, &CellRange) -> f64,
}

pub const RANGE_BUILTINS: &[RangeBuiltin] = &[
    RangeBuiltin {
        sheet_name: "SUM",
        description: "Sum of the cells in a range; non-numeric text counts as 0",
        apply: sum_range,
    },
    RangeBuiltin {
        sheet_name: "AVERAGE",
        description: "Mean of the numeric cells in a range; text is left out entirely",
        apply: average_range,
    },
];

/// Look up a range built-in by its sheet name, ignoring case.
pub fn range_builtin(name: &str) -> Option<&'static RangeBuiltin> {
    RANGE_BUILTINS
        .iter()
        .find(|b| b.sheet_name.eq_ignore_ascii_case(name))
}

/// Regex that matches a formula consisting of exactly one range call,
/// like `SUM(A1:B5)`.
///
/// Captures:
/// - group 1: function name (e.g. `SUM`)
/// - group 2: start cell ref (e.g. `A1`)
/// - group 3: end cell ref (e.g. `B5`)
pub fn range_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = RANGE_BUILTINS
            .iter()
            .map(|b| b.sheet_name)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"(?i)^\s*({})\s*\(\s*([A-Z]+[0-9]+)\s*:\s*([A-Z]+[0-9]+)\s*\)\s*$",
            names
        ))
        .expect("built-in range regex must compile")
    })
}

/// Raw values of a range. Unset cells read as "0".
fn range_values<'a>(
    store: &'a CellStore,
    range: &'a CellRange,
) -> impl Iterator<Item = &'a str> + 'a {
    range.cells().map(move |cell| match store.get(&cell) {
        "" => "0",
        raw => raw,
    })
}

pub fn sum_range(store: &CellStore, range: &CellRange) -> f64 {
    range_values(store, range)
        .map(|raw| parse_number(raw).unwrap_or(0.0))
        .sum()
}

/// Cells with no numeric value are excluded from both the total and the
/// count. An all-text range averages to 0 rather than dividing by zero.
pub fn average_range(store: &CellStore, range: &CellRange) -> f64 {
    let (total, count) = range_values(store, range)
        .filter_map(parse_number)
        .fold((0.0, 0usize), |(total, count), n| (total + n, count + 1));
    total / count.max(1) as f64
}
