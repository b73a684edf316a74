//! Output format selection.

use crate::{render_docx, render_markdown, render_pdf};
use bollybook_core::BookArtifact;
use bollybook_error::RenderError;
use uuid::Uuid;

/// Downloadable book formats.
///
/// # Examples
///
/// ```
/// use bollybook_render::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("docx").unwrap();
/// assert_eq!(format.extension(), "docx");
/// assert!(OutputFormat::from_str("epub").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Portable Document Format
    Pdf,
    /// Word document
    Docx,
    /// Markdown
    Md,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Md => "md",
        }
    }

    /// IANA media type of the rendered bytes.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Md => "text/markdown; charset=utf-8",
        }
    }

    /// Download filename for a book in this format.
    pub fn filename(&self, book_id: Uuid) -> String {
        format!("bollywood_cloud_book_{}.{}", book_id, self.extension())
    }
}

/// Render `book` in the requested format.
pub fn render(format: OutputFormat, book: &BookArtifact) -> Result<Vec<u8>, RenderError> {
    match format {
        OutputFormat::Md => Ok(render_markdown(book).into_bytes()),
        OutputFormat::Docx => render_docx(book),
        OutputFormat::Pdf => render_pdf(book),
    }
}
