//! Document rendering error types.

/// Which renderer failed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// Markdown output failed
    #[display("Error generating Markdown: {}", _0)]
    Markdown(String),
    /// DOCX packaging failed
    #[display("Error generating DOCX: {}", _0)]
    Docx(String),
    /// PDF layout or serialization failed
    #[display("Error generating PDF: {}", _0)]
    Pdf(String),
    /// Writing the rendered file failed
    #[display("Error writing output file: {}", _0)]
    Io(String),
}

/// Render error with location tracking.
///
/// # Examples
///
/// ```
/// use bollybook_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::Pdf("layout failed".to_string()));
/// assert!(format!("{}", err).contains("PDF"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new render error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
