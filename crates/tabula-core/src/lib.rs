//! tabula-core - UI-agnostic sheet model, storage and analysis plumbing.

pub mod analysis;
pub mod deck;
pub mod error;
pub mod sheet;
pub mod storage;

pub use analysis::{TextGenerator, analysis_data, analysis_prompt, run_analysis};
pub use deck::{Deck, Slide};
pub use error::{Result, TabulaError};
pub use sheet::Sheet;

pub use tabula_engine::engine::{CellRef, CellStore};
