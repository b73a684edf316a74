//! Generation job records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a book generation job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// Assembly is running
    Generating,
    /// The book was assembled and stored
    Completed,
    /// Assembly failed; see the job's error message
    Failed,
}

/// How much of the book the caller asked for.
///
/// Only `full` changes behavior today; the value is recorded on the job.
/// `"chapter"` is accepted as a synonym for `chapter_wise`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationMode {
    /// Title page, table of contents and every chapter
    #[default]
    Full,
    /// Chapter by chapter
    #[serde(alias = "chapter")]
    #[strum(to_string = "chapter_wise", serialize = "chapter")]
    ChapterWise,
}

/// Tracking record for one book generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Identifier shared with the resulting book
    pub book_id: Uuid,
    /// Requested language code
    pub language: String,
    /// Requested generation mode
    pub mode: GenerationMode,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Percent complete, 0 to 100
    pub progress: u8,
    /// Failure reason when `status` is `failed`
    pub error_message: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last status or progress change
    pub updated_at: DateTime<Utc>,
}

impl GenerationJob {
    /// A fresh job in the `generating` state at 0%.
    pub fn start(book_id: Uuid, language: impl Into<String>, mode: GenerationMode) -> Self {
        let now = Utc::now();
        Self {
            book_id,
            language: language.into(),
            mode,
            status: JobStatus::Generating,
            progress: 0,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single chapter generated on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Record identifier
    pub chapter_id: Uuid,
    /// Requested chapter number
    pub chapter_number: u32,
    /// Requested chapter title
    pub chapter_title: String,
    /// Language code
    pub language: String,
    /// Generated text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
