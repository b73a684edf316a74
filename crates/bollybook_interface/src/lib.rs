//! Trait definitions for the Bollybook e-book generator.
//!
//! Each external collaborator (LLM provider, persistence, transcript service)
//! sits behind a trait defined here so the generation pipeline and the HTTP
//! layer can be tested against in-process fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{AssemblyObserver, BollybookDriver, JobStore, NoopObserver, TranscriptSource};
pub use types::{AssemblyStep, TranscriptEntry};
