//! Content extraction error types.

/// Specific error conditions for text extraction and transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExtractErrorKind {
    /// The declared document type has no extractor
    #[display("Unsupported file type: {}", _0)]
    UnsupportedFormat(String),
    /// The underlying parser failed
    #[display("Error extracting {}: {}", format, message)]
    ExtractionFailure {
        /// Document type being parsed
        format: String,
        /// Parser error message
        message: String,
    },
    /// No video id could be found in the URL
    #[display("Invalid YouTube URL: {}", _0)]
    InvalidUrl(String),
    /// The transcript service returned an error
    #[display("Error getting YouTube transcript: {}", _0)]
    TranscriptUnavailable(String),
    /// A recognized input that has no implementation yet
    #[display("{}", _0)]
    NotImplemented(String),
}

/// Extraction error with location tracking.
///
/// # Examples
///
/// ```
/// use bollybook_error::{ExtractError, ExtractErrorKind};
///
/// let err = ExtractError::new(ExtractErrorKind::UnsupportedFormat("odt".to_string()));
/// assert!(format!("{}", err).contains("odt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extract Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractError {
    /// The kind of error that occurred
    pub kind: ExtractErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExtractError {
    /// Create a new extraction error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an [`ExtractErrorKind::ExtractionFailure`].
    #[track_caller]
    pub fn failure(format: impl Into<String>, message: impl ToString) -> Self {
        Self::new(ExtractErrorKind::ExtractionFailure {
            format: format.into(),
            message: message.to_string(),
        })
    }
}
