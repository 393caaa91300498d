//! Presentation deck model and its JSON export.

use serde::Serialize;

use crate::error::{Result, TabulaError};

#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub notes: String,
}

/// One exported slide. Numbering follows deck order, not slide ids.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedSlide<'a> {
    slide_number: usize,
    title: &'a str,
    content: &'a str,
    notes: &'a str,
}

/// An ordered list of slides. A deck is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
    next_id: u64,
}

impl Deck {
    pub fn new() -> Self {
        Deck {
            slides: vec![Slide {
                id: 1,
                title: "Title Slide".to_string(),
                content: "Click to edit".to_string(),
                notes: String::new(),
            }],
            next_id: 2,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Append a placeholder slide and return its id.
    pub fn add_slide(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.slides.push(Slide {
            id,
            title: "New Slide".to_string(),
            content: "Click to edit".to_string(),
            notes: String::new(),
        });
        id
    }

    pub fn slide_mut(&mut self, id: u64) -> Result<&mut Slide> {
        self.slides
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TabulaError::SlideNotFound(id))
    }

    /// Replace the text of a slide, keeping its id and position.
    pub fn update_slide(&mut self, id: u64, title: &str, content: &str, notes: &str) -> Result<()> {
        let slide = self.slide_mut(id)?;
        slide.title = title.to_string();
        slide.content = content.to_string();
        slide.notes = notes.to_string();
        Ok(())
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.slides
            .iter()
            .position(|s| s.id == id)
            .ok_or(TabulaError::SlideNotFound(id))
    }

    /// Insert a copy of a slide right after it and return the copy's id.
    pub fn duplicate_slide(&mut self, id: u64) -> Result<u64> {
        let idx = self.position(id)?;
        let copy_id = self.next_id;
        self.next_id += 1;
        let copy = Slide {
            id: copy_id,
            ..self.slides[idx].clone()
        };
        self.slides.insert(idx + 1, copy);
        Ok(copy_id)
    }

    /// Remove a slide. The last remaining slide cannot be removed.
    pub fn remove_slide(&mut self, id: u64) -> Result<()> {
        let idx = self.position(id)?;
        if self.slides.len() == 1 {
            return Err(TabulaError::LastSlide);
        }
        self.slides.remove(idx);
        Ok(())
    }

    /// Pretty-printed JSON array of `{slideNumber, title, content, notes}`.
    pub fn export_json(&self) -> Result<String> {
        let exported: Vec<ExportedSlide<'_>> = self
            .slides
            .iter()
            .enumerate()
            .map(|(idx, s)| ExportedSlide {
                slide_number: idx + 1,
                title: &s.title,
                content: &s.content,
                notes: &s.notes,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&exported)?)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
