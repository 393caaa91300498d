//! Sparse raw-value storage for the grid.
//!
//! The store only ever holds non-empty raw text. Setting a cell to the empty
//! string removes it, so `len()` is the number of cells the user has typed into.

use std::collections::BTreeMap;

use super::cell_ref::CellRef;
use super::error::{FormulaError, Result};

/// Mapping from cell address to the exact text typed into it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellStore {
    cells: BTreeMap<CellRef, String>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a cell, `""` when unset.
    pub fn get(&self, cell: &CellRef) -> &str {
        self.cells.get(cell).map(String::as_str).unwrap_or("")
    }

    /// Raw value by address. Malformed addresses read as unset.
    pub fn get_addr(&self, addr: &str) -> &str {
        match CellRef::from_str(addr) {
            Some(cell) => self.get(&cell),
            None => "",
        }
    }

    /// Insert or overwrite. An empty value deletes the cell.
    pub fn set(&mut self, cell: CellRef, raw: impl Into<String>) {
        let raw = raw.into();
        if raw.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, raw);
        }
    }

    pub fn set_addr(&mut self, addr: &str, raw: impl Into<String>) -> Result<()> {
        let cell = CellRef::from_str(addr)
            .ok_or_else(|| FormulaError::InvalidReference(addr.to_string()))?;
        self.set(cell, raw);
        Ok(())
    }

    pub fn remove(&mut self, cell: &CellRef) -> Option<String> {
        self.cells.remove(cell)
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.cells.contains_key(cell)
    }

    /// All non-empty cells in row-major order. The iterator is `Clone`, so
    /// callers can walk it more than once.
    pub fn values(&self) -> impl Iterator<Item = (&CellRef, &str)> + Clone + '_ {
        self.cells.iter().map(|(cell, raw)| (cell, raw.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<K: Into<String>> FromIterator<(CellRef, K)> for CellStore {
    fn from_iter<I: IntoIterator<Item = (CellRef, K)>>(iter: I) -> Self {
        let mut store = CellStore::new();
        for (cell, raw) in iter {
            store.set(cell, raw);
        }
        store
    }
}
