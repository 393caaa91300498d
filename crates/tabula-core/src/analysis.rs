//! AI analysis of sheet contents through a text-generation collaborator.
//!
//! The sheet never talks to a network itself. Callers hand in anything that
//! implements [`TextGenerator`]; this module only builds the prompt from the
//! raw cell values and stitches the streamed reply back together.

use crate::error::{Result, TabulaError};
use tabula_engine::engine::CellStore;

/// Placeholder replaced by the sheet data in a prompt template.
pub const DATA_PLACEHOLDER: &str = "{data}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "Analyze this spreadsheet data and provide insights, \
patterns, and recommendations. Keep it concise and actionable.\n\nData: {data}";

/// A stream of generated text chunks.
pub type ChunkStream = Box<dyn Iterator<Item = Result<String>>>;

/// Something that turns a prompt into text.
pub trait TextGenerator {
    /// Single-shot completion.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Incremental completion. The default wraps [`TextGenerator::complete`]
    /// as a one-chunk stream.
    fn stream(&self, prompt: &str) -> Result<ChunkStream> {
        let text = self.complete(prompt)?;
        Ok(Box::new(std::iter::once(Ok(text))))
    }
}

/// Non-blank cells as `"A1: 10, B1: =A1*2"`, in row-major order.
pub fn analysis_data(store: &CellStore) -> String {
    store
        .values()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(cell_ref, raw)| format!("{}: {}", cell_ref, raw))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fill a prompt template with sheet data. A template without the
/// placeholder gets the data appended on its own line.
pub fn analysis_prompt(template: &str, data: &str) -> String {
    if template.contains(DATA_PLACEHOLDER) {
        template.replace(DATA_PLACEHOLDER, data)
    } else {
        format!("{}\n\n{}", template, data)
    }
}

/// Stream an analysis of the sheet.
///
/// `on_progress` sees the accumulated text after every chunk. The full text is
/// returned at the end. A sheet with no data fails with
/// [`TabulaError::EmptySheet`] before the generator is called.
pub fn run_analysis<G, F>(
    generator: &G,
    store: &CellStore,
    template: &str,
    mut on_progress: F,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
    F: FnMut(&str),
{
    let data = analysis_data(store);
    if data.is_empty() {
        return Err(TabulaError::EmptySheet);
    }

    let prompt = analysis_prompt(template, &data);
    log::debug!("requesting analysis of {} cells", store.len());

    let mut result = String::new();
    for chunk in generator.stream(&prompt)? {
        let chunk = chunk?;
        result.push_str(&chunk);
        on_progress(&result);
    }
    Ok(result)
}
