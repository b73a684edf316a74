//! Reference text extraction for Bollybook.
//!
//! Turns uploaded slides and notes (PDF, DOCX, PPTX, TXT) into plain text and
//! fetches YouTube transcripts through a [`TranscriptSource`].
//!
//! [`TranscriptSource`]: bollybook_interface::TranscriptSource

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod ooxml;
mod transcript;
mod youtube;

pub use document::{DocumentType, extract_text};
pub use transcript::{YouTubeTranscriptConfig, YouTubeTranscriptConfigBuilder, YouTubeTranscriptSource};
pub use youtube::{extract_playlist_id, extract_video_id, get_transcript};
