//! Parser for the line-oriented sheet format (`ADDRESS: RAW`).

use crate::error::{TabulaError, Result};
use std::fs;
use std::path::Path;
use tabula_engine::engine::{CellRef, CellStore};

/// Parse a sheet file into a store of raw values
pub fn parse_sheet(path: &Path) -> Result<CellStore> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse sheet content from a string
pub fn parse_sheet_content(content: &str) -> Result<CellStore> {
    let mut store = CellStore::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: RAW". Addresses never contain ':', so the first one splits.
        let Some((cell_ref_str, raw)) = line.split_once(':') else {
            return Err(TabulaError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| TabulaError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        let raw = raw.strip_prefix(' ').unwrap_or(raw).trim_end_matches('\r');
        store.set(cell_ref, unescape_raw(raw));
    }

    Ok(store)
}

fn unescape_raw(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
