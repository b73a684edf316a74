//! Error types for the Bollybook e-book generator.
//!
//! This crate provides the error taxonomy shared by every Bollybook crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The API layer converts any [`BollybookError`] into a client-visible
//! response; [`BollybookError::detail`] yields the message without the
//! source location.
//!
//! # Examples
//!
//! ```
//! use bollybook_error::{BollybookResult, ValidationError};
//!
//! fn check_format(format: &str) -> BollybookResult<()> {
//!     if format != "pdf" {
//!         Err(ValidationError::new("Format must be pdf, docx, or md"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_format("epub").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod extract;
mod generation;
mod render;
mod store;
mod validation;

pub use config::ConfigError;
pub use error::{BollybookError, BollybookErrorKind, BollybookResult};
pub use extract::{ExtractError, ExtractErrorKind};
pub use generation::{GenerationError, GenerationErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use validation::ValidationError;
