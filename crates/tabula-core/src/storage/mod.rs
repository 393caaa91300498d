//! Sheet file and CSV storage.

mod csv;
mod parser;
mod writer;

pub use csv::{csv_content, parse_csv, parse_csv_content, write_csv};
pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
