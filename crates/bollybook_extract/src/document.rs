//! Document type dispatch.

use crate::ooxml;
use bollybook_error::{ExtractError, ExtractErrorKind};
use std::str::FromStr;
use tracing::instrument;

/// Document formats the extractor understands.
///
/// # Examples
///
/// ```
/// use bollybook_extract::DocumentType;
///
/// assert_eq!("PPTX".parse::<DocumentType>().unwrap(), DocumentType::Pptx);
/// assert_eq!(DocumentType::from_filename("Lecture 1.Docx"), Some(DocumentType::Docx));
/// assert_eq!(DocumentType::from_filename("notes"), None);
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
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DocumentType {
    /// Portable Document Format
    Pdf,
    /// Word document
    Docx,
    /// PowerPoint presentation
    Pptx,
    /// UTF-8 plain text
    Txt,
}

impl DocumentType {
    /// Type named by a filename's extension, if recognized.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_str(ext).ok()
    }
}

/// Extract plain text from a document's raw bytes.
///
/// `declared_type` is a format tag such as `"pdf"` or `"docx"` and is matched
/// case-insensitively.
///
/// # Errors
///
/// [`ExtractErrorKind::UnsupportedFormat`] for unknown tags and
/// [`ExtractErrorKind::ExtractionFailure`] when the parser rejects the bytes.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn extract_text(bytes: &[u8], declared_type: &str) -> Result<String, ExtractError> {
    let doc_type = DocumentType::from_str(declared_type.trim()).map_err(|_| {
        ExtractError::new(ExtractErrorKind::UnsupportedFormat(declared_type.to_string()))
    })?;

    let text = match doc_type {
        DocumentType::Pdf => extract_pdf(bytes)?,
        DocumentType::Docx => ooxml::docx_text(bytes)?,
        DocumentType::Pptx => ooxml::pptx_text(bytes)?,
        DocumentType::Txt => String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractError::failure("TXT", e))?,
    };

    tracing::debug!(format = %doc_type, chars = text.chars().count(), "Extracted text");
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::failure("PDF", e))?;
    // Pages arrive separated by form feeds.
    Ok(text.replace('\u{000C}', "\n"))
}
