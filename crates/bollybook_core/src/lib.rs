//! Core data types for the Bollybook e-book generator.
//!
//! This crate provides the foundation data types used across all Bollybook
//! crates: the language persona registry, the fixed curriculum, upload and
//! job records, the book artifact, and the provider-neutral LLM request types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod book;
mod curriculum;
mod job;
mod language;
mod message;
mod request;
mod role;
mod text;
mod upload;

pub use book::{BookArtifact, Chapter};
pub use curriculum::{BOOK_TITLE, CURRICULUM, ChapterPlan, SYLLABUS};
pub use job::{ChapterRecord, GenerationJob, GenerationMode, JobStatus};
pub use language::{LanguageProfile, list_all, lookup, resolve};
pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output};
pub use role::Role;
pub use text::{truncate_chars, word_count};
pub use upload::{UPLOAD_CONTENT_LIMIT, Upload, UploadKind};
