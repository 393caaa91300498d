use std::path::PathBuf;
use tabula_engine::engine::CellStore;

/// Rows in a new sheet
pub const DEFAULT_ROWS: usize = 15;
/// Columns in a new sheet
pub const DEFAULT_COLS: usize = 10;

/// UI-agnostic state for one spreadsheet.
///
/// The store holds raw text only. Display values are derived on every read
/// and never cached, so the raw formula is always the source of truth.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Raw cell values
    pub store: CellStore,
    /// Grid height
    pub rows: usize,
    /// Grid width
    pub cols: usize,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has unsaved edits
    pub modified: bool,
}

impl Sheet {
    /// Create an empty sheet with the default bounds.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    pub fn with_size(rows: usize, cols: usize) -> Self {
        Sheet {
            store: CellStore::new(),
            rows,
            cols,
            file_path: None,
            modified: false,
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
