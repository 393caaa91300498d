//! CSV import/export functionality

use crate::error::Result;
use std::fs;
use std::path::Path;
use tabula_engine::engine::{CellRef, CellStore, evaluate};

/// Parse a CSV file into raw cell values, starting at the given offset
pub fn parse_csv(path: &Path, start_row: usize, start_col: usize) -> Result<Vec<(CellRef, String)>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_csv_content(&content, start_row, start_col))
}

/// Parse CSV text into raw cell values. Empty fields are skipped.
pub fn parse_csv_content(content: &str, start_row: usize, start_col: usize) -> Vec<(CellRef, String)> {
    let mut cells = Vec::new();

    for (row_idx, record) in parse_csv_records(content).into_iter().enumerate() {
        for (col_idx, field) in record.into_iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            cells.push((CellRef::new(start_row + row_idx, start_col + col_idx), field));
        }
    }

    cells
}

/// Split CSV text into records of fields.
///
/// Quoted fields keep their whitespace and may span lines; unquoted fields
/// are trimmed. Records end at `\n` or `\r\n` outside quotes.
pub(crate) fn parse_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = content.chars().peekable();

    fn finish_field(fields: &mut Vec<String>, current: &mut String, quoted: bool) {
        let field = std::mem::take(current);
        if quoted {
            fields.push(field);
        } else {
            fields.push(field.trim().to_string());
        }
    }

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                field_was_quoted = true;
            }
            ',' => {
                finish_field(&mut fields, &mut current, field_was_quoted);
                field_was_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_field(&mut fields, &mut current, field_was_quoted);
                field_was_quoted = false;
                records.push(std::mem::take(&mut fields));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || field_was_quoted || !fields.is_empty() {
        finish_field(&mut fields, &mut current, field_was_quoted);
        records.push(fields);
    }
    records
}

/// Parse a single CSV line, handling quoted fields
#[cfg(test)]
fn parse_csv_line(line: &str) -> Vec<String> {
    parse_csv_records(line).into_iter().next().unwrap_or_default()
}

/// Render the display values of a `rows` x `cols` grid as CSV.
///
/// Every cell is quoted, including empty ones, and every row ends with a
/// newline.
pub fn csv_content(store: &CellStore, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    for row in 0..rows {
        let fields: Vec<String> = (0..cols)
            .map(|col| {
                let display = evaluate(store.get(&CellRef::new(row, col)), store);
                quote_csv_field(&display)
            })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Export the display values of a `rows` x `cols` grid to a CSV file
pub fn write_csv(path: &Path, store: &CellStore, rows: usize, cols: usize) -> Result<()> {
    fs::write(path, csv_content(store, rows, cols))?;
    Ok(())
}

fn quote_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
