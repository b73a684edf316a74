//! Uploaded reference material.

use crate::truncate_chars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters of extracted text kept per upload.
pub const UPLOAD_CONTENT_LIMIT: usize = 5000;

/// Where an upload came from.
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
pub enum UploadKind {
    /// Lecture slides (pdf, pptx, docx)
    Slides,
    /// Notes (txt, pdf, docx)
    Notes,
    /// A YouTube transcript
    Youtube,
}

/// Extracted text from one uploaded source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    /// Upload identifier
    pub id: Uuid,
    /// Source category
    #[serde(rename = "type")]
    pub kind: UploadKind,
    /// Original filename or URL
    pub source_name: String,
    /// Extracted text, at most [`UPLOAD_CONTENT_LIMIT`] characters
    pub content: String,
    /// Where the raw upload was saved, if it was a file
    pub file_path: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Upload {
    /// Build a new upload record, truncating `content` to the storage limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use bollybook_core::{Upload, UploadKind, UPLOAD_CONTENT_LIMIT};
    ///
    /// let long = "x".repeat(UPLOAD_CONTENT_LIMIT + 10);
    /// let upload = Upload::new(UploadKind::Notes, "notes.txt", &long, None);
    /// assert_eq!(upload.content.chars().count(), UPLOAD_CONTENT_LIMIT);
    /// ```
    pub fn new(
        kind: UploadKind,
        source_name: impl Into<String>,
        content: &str,
        file_path: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            source_name: source_name.into(),
            content: truncate_chars(content, UPLOAD_CONTENT_LIMIT).to_string(),
            file_path,
            created_at: Utc::now(),
        }
    }
}
