//! Document renderers for Bollybook.
//!
//! A [`BookArtifact`](bollybook_core::BookArtifact) renders to Markdown, DOCX
//! or PDF bytes. Rendering is pure; [`write_atomic`] puts the bytes on disk
//! without ever exposing a half-written file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod docx;
mod format;
mod markdown;
mod output;
mod pdf;

pub use docx::render_docx;
pub use format::{OutputFormat, render};
pub use markdown::render_markdown;
pub use output::write_atomic;
pub use pdf::{book_html, escape_html, render_pdf};
