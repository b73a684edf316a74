//! Top-level error wrapper types.

use crate::{
    ConfigError, ExtractError, GenerationError, RenderError, StoreError, ValidationError,
};

/// Every failure a Bollybook component can raise.
///
/// # Examples
///
/// ```
/// use bollybook_error::{BollybookError, ValidationError};
///
/// let err: BollybookError = ValidationError::new("bad format").into();
/// assert!(format!("{}", err).contains("Validation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BollybookErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Invalid caller input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Text or transcript extraction error
    #[from(ExtractError)]
    Extract(ExtractError),
    /// LLM generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Document rendering error
    #[from(RenderError)]
    Render(RenderError),
    /// Job store error
    #[from(StoreError)]
    Store(StoreError),
}

/// Bollybook error with kind discrimination.
///
/// # Examples
///
/// ```
/// use bollybook_error::{BollybookResult, ConfigError};
///
/// fn might_fail() -> BollybookResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Bollybook Error: {}", _0)]
pub struct BollybookError(Box<BollybookErrorKind>);

impl BollybookError {
    /// Create a new error from a kind.
    pub fn new(kind: BollybookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BollybookErrorKind {
        &self.0
    }

    /// Human-readable message without the source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use bollybook_error::{BollybookError, StoreError, StoreErrorKind};
    ///
    /// let err = BollybookError::from(StoreError::new(StoreErrorKind::NotFound("Book".into())));
    /// assert_eq!(err.detail(), "Book not found");
    /// ```
    pub fn detail(&self) -> String {
        match self.kind() {
            BollybookErrorKind::Config(e) => e.message.clone(),
            BollybookErrorKind::Validation(e) => e.message.clone(),
            BollybookErrorKind::Extract(e) => e.kind.to_string(),
            BollybookErrorKind::Generation(e) => e.kind.to_string(),
            BollybookErrorKind::Render(e) => e.kind.to_string(),
            BollybookErrorKind::Store(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to BollybookErrorKind
impl<T> From<T> for BollybookError
where
    T: Into<BollybookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Bollybook operations.
pub type BollybookResult<T> = std::result::Result<T, BollybookError>;
