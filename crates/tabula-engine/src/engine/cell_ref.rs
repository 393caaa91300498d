//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style addresses
//! (e.g., "A1", "C3", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use tabula_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("C3").unwrap();
//! assert_eq!(cell.col, 2); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "C3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row and column indices (0-indexed).
///
/// Field order matters: the derived ordering is row-major, which is the
/// enumeration order used by the store, ranges and exports.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let col = letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

/// Column label for a 0-based column index.
pub fn column_label(index: usize) -> String {
    CellRef::col_to_letters(index)
}

/// Address string for a 0-based (row, col) pair. Rows are 1-based in addresses.
pub fn cell_address(row: usize, col: usize) -> String {
    CellRef::new(row, col).to_string()
}

/// Bijective base-26 decode. `None` on overflow or non-letters.
pub(crate) fn letters_to_col(letters: &str) -> Option<usize> {
    let mut acc = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    acc.checked_sub(1)
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell address regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}
