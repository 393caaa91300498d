use super::Sheet;
use crate::error::{Result, TabulaError};
use tabula_engine::engine::{CellRef, evaluate};

impl Sheet {
    /// Whether a cell lies inside the grid bounds
    pub fn in_bounds(&self, cell_ref: &CellRef) -> bool {
        cell_ref.row < self.rows && cell_ref.col < self.cols
    }

    fn check_bounds(&self, cell_ref: &CellRef) -> Result<()> {
        if self.in_bounds(cell_ref) {
            Ok(())
        } else {
            Err(TabulaError::OutOfBounds {
                cell: cell_ref.to_string(),
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Store what the user typed. An empty input clears the cell.
    pub fn set_cell_from_input(&mut self, cell_ref: CellRef, input: &str) -> Result<()> {
        self.check_bounds(&cell_ref)?;
        self.store.set(cell_ref, input);
        self.modified = true;
        Ok(())
    }

    /// Like [`Sheet::set_cell_from_input`], addressed by name (e.g. "C3").
    pub fn set_cell_by_name(&mut self, name: &str, input: &str) -> Result<()> {
        let cell_ref =
            CellRef::from_str(name).ok_or_else(|| TabulaError::InvalidCellRef(name.to_string()))?;
        self.set_cell_from_input(cell_ref, input)
    }

    pub fn clear_cell(&mut self, cell_ref: &CellRef) {
        if self.store.remove(cell_ref).is_some() {
            self.modified = true;
        }
    }

    /// Drop every cell ("Clear All").
    pub fn clear_all(&mut self) {
        if !self.store.is_empty() {
            self.store.clear();
            self.modified = true;
        }
    }

    /// The text exactly as typed, `""` when unset
    pub fn get_raw(&self, cell_ref: &CellRef) -> &str {
        self.store.get(cell_ref)
    }

    /// The value shown for a cell
    pub fn get_cell_display(&self, cell_ref: &CellRef) -> String {
        evaluate(self.store.get(cell_ref), &self.store)
    }

    /// Display values for the whole grid, one inner vector per row.
    pub fn display_grid(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.get_cell_display(&CellRef::new(row, col)))
                    .collect()
            })
            .collect()
    }
}
