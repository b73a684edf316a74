//! Supporting types for the interface traits.

use serde::{Deserialize, Serialize};

/// One timed caption line from a video transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Caption text
    pub text: String,
}

/// A completed stage of book assembly.
///
/// # Examples
///
/// ```
/// use bollybook_interface::AssemblyStep;
///
/// assert_eq!(AssemblyStep::ChapterGenerated(3).to_string(), "chapter 3 generated");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AssemblyStep {
    /// Assembly accepted, nothing generated yet
    #[display("started")]
    Started,
    /// The title page came back
    #[display("title generated")]
    TitleGenerated,
    /// The table of contents came back
    #[display("toc generated")]
    TocGenerated,
    /// A chapter came back
    #[display("chapter {} generated", _0)]
    ChapterGenerated(u32),
    /// Every chapter is in and the artifact validated
    #[display("completed")]
    Completed,
}
