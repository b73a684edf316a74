//! Book generation for Bollybook.
//!
//! This crate turns a language choice and optional reference material into a
//! complete [`BookArtifact`](bollybook_core::BookArtifact):
//!
//! - **Prompt composition**: pure functions building the title, table of
//!   contents and chapter prompts
//! - **Generation session**: one persona-conditioned LLM call per prompt
//! - **Book assembly**: title page, table of contents and the thirteen
//!   curriculum chapters, reported step by step to an observer
//!
//! # Example
//!
//! ```rust,ignore
//! use bollybook_narrative::{BookAssembler, GenerationSession};
//! use bollybook_models::{OpenAiClient, OpenAiConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = OpenAiClient::new(OpenAiConfig::builder().api_key("sk-...").build()?);
//! let assembler = BookAssembler::new(GenerationSession::new(Arc::new(driver)));
//!
//! let book = assembler.assemble("hindi", "").await?;
//! println!("{} chapters", book.chapters.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod prompts;
mod session;

pub use assembler::{BookAssembler, DEFAULT_CHAPTER_PAGES, TOTAL_STEPS};
pub use prompts::{
    CHAPTER_EXCERPT_LIMIT, PAGE_TEMPLATE, TOC_EXCERPT_LIMIT, chapter_prompt, chapter_session_key,
    title_prompt, title_session_key, toc_prompt, toc_session_key,
};
pub use session::GenerationSession;
