//! Rectangular cell ranges ("A1:B5").

use super::cell_ref::CellRef;
use super::error::{FormulaError, Result};

pub(crate) const MAX_RANGE_CELLS: usize = 1_000_000;

/// A rectangular span of cells, normalized so `start` is the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Build a range from two corners given in any order.
    pub fn new(a: &CellRef, b: &CellRef) -> CellRange {
        CellRange {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Build a range from two address strings, rejecting malformed addresses
    /// and spans larger than the engine is willing to walk.
    pub fn from_addresses(addr1: &str, addr2: &str) -> Result<CellRange> {
        let a = CellRef::from_str(addr1.trim())
            .ok_or_else(|| FormulaError::InvalidReference(addr1.to_string()))?;
        let b = CellRef::from_str(addr2.trim())
            .ok_or_else(|| FormulaError::InvalidReference(addr2.to_string()))?;
        Self::bounded(&a, &b)
    }

    /// Like [`CellRange::new`], but refuses spans larger than the engine is
    /// willing to walk.
    pub fn bounded(a: &CellRef, b: &CellRef) -> Result<CellRange> {
        let range = CellRange::new(a, b);
        match range.checked_len() {
            Some(n) if n <= MAX_RANGE_CELLS => Ok(range),
            _ => Err(FormulaError::RangeTooLarge(format!("{}:{}", a, b))),
        }
    }

    /// Parse "A1:B5" notation.
    pub fn parse(range: &str) -> Result<CellRange> {
        let Some((a, b)) = range.split_once(':') else {
            return Err(FormulaError::InvalidRange(range.to_string()));
        };
        if b.contains(':') {
            return Err(FormulaError::InvalidRange(range.to_string()));
        }
        Self::from_addresses(a, b)
    }

    fn checked_len(&self) -> Option<usize> {
        let rows = self.end.row - self.start.row + 1;
        let cols = self.end.col - self.start.col + 1;
        rows.checked_mul(cols)
    }

    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// A range always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every cell in the span, rows outer, columns inner.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + Clone + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| CellRef::new(row, col))
        })
    }
}

/// Expand two corner addresses into every address of the span, row-major.
pub fn parse_range(addr1: &str, addr2: &str) -> Result<Vec<String>> {
    let range = CellRange::from_addresses(addr1, addr2)?;
    Ok(range.cells().map(|c| c.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_row_major() {
        assert_eq!(parse_range("A1", "B2").unwrap(), vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_parse_range_single_cell() {
        assert_eq!(parse_range("C3", "C3").unwrap(), vec!["C3"]);
    }

    #[test]
    fn test_parse_range_reversed_corners_normalize() {
        assert_eq!(parse_range("B2", "A1").unwrap(), parse_range("A1", "B2").unwrap());
        assert_eq!(parse_range("A3", "A1").unwrap(), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_parse_range_rejects_malformed() {
        assert!(matches!(
            parse_range("A0", "B2"),
            Err(FormulaError::InvalidReference(_))
        ));
        assert!(parse_range("1A", "B2").is_err());
        assert!(parse_range("", "B2").is_err());
    }

    #[test]
    fn test_parse_range_rejects_huge_spans() {
        assert!(matches!(
            parse_range("A1", "A1000001"),
            Err(FormulaError::RangeTooLarge(_))
        ));
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("B2:D10").unwrap();
        assert_eq!(range.start, CellRef::new(1, 1));
        assert_eq!(range.end, CellRef::new(9, 3));
        assert_eq!(range.len(), 27);

        assert!(CellRange::parse("A1").is_err());
        assert!(CellRange::parse("A1:B2:C3").is_err());
        assert!(CellRange::parse("invalid").is_err());
    }

    #[test]
    fn test_cells_iterator_is_restartable() {
        let range = CellRange::parse("A1:A3").unwrap();
        let cells = range.cells();
        assert_eq!(cells.clone().count(), 3);
        assert_eq!(cells.count(), 3);
    }
}
