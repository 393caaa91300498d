//! Writer for the line-oriented sheet format

use crate::error::Result;
use std::fs;
use std::path::Path;
use tabula_engine::engine::CellStore;

/// Write a store to a sheet file
pub fn write_sheet(path: &Path, store: &CellStore) -> Result<()> {
    let content = write_sheet_content(store);
    fs::write(path, content)?;
    Ok(())
}

/// Write a store to sheet format. Cells come out in row-major order.
pub fn write_sheet_content(store: &CellStore) -> String {
    let mut lines = vec!["# Tabula Sheet".to_string()];
    for (cell_ref, raw) in store.values() {
        lines.push(format!("{}: {}", cell_ref, escape_raw(raw)));
    }
    lines.join("\n") + "\n"
}

fn escape_raw(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
