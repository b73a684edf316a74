//! LLM generation error types.

/// Specific error conditions for a generation call or a book assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The request never reached the provider or the connection broke
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// The provider answered with an error status
    #[display("Provider returned {}: {}", status, message)]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The provider answer could not be decoded
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// The provider returned no text
    #[display("Empty completion for session '{}'", _0)]
    EmptyResponse(String),
    /// The call or the whole job exceeded its time budget
    #[display("Timed out after {}s: {}", seconds, scope)]
    Timeout {
        /// What timed out (session key or "book")
        scope: String,
        /// Budget in seconds
        seconds: u64,
    },
    /// Request could not be built
    #[display("Failed to build request: {}", _0)]
    Builder(String),
    /// Assembly invariants were not met
    #[display("Book assembly failed: {}", _0)]
    Assembly(String),
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use bollybook_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Transport("connection reset".into()));
/// assert!(format!("{}", err).contains("connection reset"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
