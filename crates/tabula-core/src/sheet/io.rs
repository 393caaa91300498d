use super::Sheet;
use crate::error::{Result, TabulaError};
use crate::storage::{parse_csv, parse_sheet, write_csv, write_sheet};
use std::path::{Path, PathBuf};
use tabula_engine::engine::{CellRef, CellStore};

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl Sheet {
    /// Create a sheet with the given bounds and load a file if provided.
    ///
    /// A path that does not exist yet becomes the save target of an empty sheet.
    pub fn with_file(path: Option<PathBuf>, rows: usize, cols: usize) -> Result<Self> {
        let mut sheet = Self::with_size(rows, cols);
        if let Some(p) = path {
            if p.exists() {
                sheet.load_file(&p)?;
            } else {
                sheet.file_path = Some(p);
            }
        }
        Ok(sheet)
    }

    /// Load from file, replacing the current contents.
    ///
    /// `.csv` files are imported at A1 and leave no save target behind (saving
    /// would otherwise overwrite the CSV with the sheet format).
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let csv = is_csv(path);
        let store = if csv {
            self.bounded_store(path, parse_csv(path, 0, 0)?)
        } else {
            let loaded = parse_sheet(path)?;
            self.bounded_store(
                path,
                loaded.values().map(|(cell_ref, raw)| (cell_ref.clone(), raw.to_string())),
            )
        };
        log::info!("loaded {} cells from {}", store.len(), path.display());

        self.store = store;
        self.file_path = if csv { None } else { Some(path.to_path_buf()) };
        self.modified = false;
        Ok(())
    }

    /// Collect cells into a fresh store, dropping those outside the grid.
    fn bounded_store(
        &self,
        path: &Path,
        cells: impl IntoIterator<Item = (CellRef, String)>,
    ) -> CellStore {
        let mut store = CellStore::new();
        for (cell_ref, raw) in cells {
            if self.in_bounds(&cell_ref) {
                store.set(cell_ref, raw);
            } else {
                log::warn!("{}: skipping {} outside the grid", path.display(), cell_ref);
            }
        }
        store
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(TabulaError::NoFilePath);
        };
        write_sheet(&path, &self.store)?;
        log::info!("saved {} cells to {}", self.store.len(), path.display());
        self.modified = false;
        Ok(path)
    }

    /// Save to a new path and make it the current one.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }

    /// Import CSV fields as raw values at the given offset.
    /// Returns the number of cells imported.
    pub fn import_csv(&mut self, path: &Path, start_row: usize, start_col: usize) -> Result<usize> {
        let cells = parse_csv(path, start_row, start_col)?;
        let mut imported = 0;
        for (cell_ref, raw) in cells {
            if !self.in_bounds(&cell_ref) {
                log::warn!("{}: skipping {} outside the grid", path.display(), cell_ref);
                continue;
            }
            self.store.set(cell_ref, raw);
            imported += 1;
        }
        if imported > 0 {
            self.modified = true;
        }
        log::info!("imported {} cells from {}", imported, path.display());
        Ok(imported)
    }

    /// Export display values over the full grid as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        write_csv(path, &self.store, self.rows, self.cols)?;
        log::info!("exported {}x{} grid to {}", self.rows, self.cols, path.display());
        Ok(())
    }
}
