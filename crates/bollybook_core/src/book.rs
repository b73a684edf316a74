//! The generated book artifact.

use bollybook_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based chapter number
    pub number: u32,
    /// Chapter title
    pub title: String,
    /// Page target the chapter was requested with
    pub target_pages: u32,
    /// Generated text
    pub content: String,
}

/// A complete book: title page, table of contents and chapters in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookArtifact {
    /// Identifier shared with the generation job
    pub book_id: Uuid,
    /// Language code the book was written in
    pub language: String,
    /// Generated title page
    pub title_page: String,
    /// Generated table of contents
    #[serde(rename = "toc")]
    pub table_of_contents: String,
    /// Chapters ordered by number
    pub chapters: Vec<Chapter>,
}

impl BookArtifact {
    /// Check that the title page and table of contents are present and the
    /// chapters are numbered 1..=n in order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::Assembly`] describing the first violation.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.title_page.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Assembly(
                "title page is empty".to_string(),
            )));
        }
        if self.table_of_contents.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Assembly(
                "table of contents is empty".to_string(),
            )));
        }
        for (expected, chapter) in (1u32..).zip(&self.chapters) {
            if chapter.number != expected {
                return Err(GenerationError::new(GenerationErrorKind::Assembly(
                    format!(
                        "chapter at position {} is numbered {}",
                        expected, chapter.number
                    ),
                )));
            }
        }
        Ok(())
    }
}
