//! Diesel row types and their conversions to domain records.

use crate::schema::{books, chapters, generation_jobs, uploads};
use bollybook_core::{BookArtifact, ChapterRecord, GenerationJob, Upload};
use bollybook_error::{StoreError, StoreErrorKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

fn serialization(message: String) -> StoreError {
    StoreError::new(StoreErrorKind::Serialization(message))
}

/// Row in the `uploads` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = uploads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UploadRow {
    /// Upload identifier
    pub id: Uuid,
    /// Source category, lowercase
    pub kind: String,
    /// Original filename or URL
    pub source_name: String,
    /// Extracted text
    pub content: String,
    /// Saved file location
    pub file_path: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Upload> for UploadRow {
    fn from(upload: &Upload) -> Self {
        Self {
            id: upload.id,
            kind: upload.kind.to_string(),
            source_name: upload.source_name.clone(),
            content: upload.content.clone(),
            file_path: upload.file_path.clone(),
            created_at: upload.created_at,
        }
    }
}

impl TryFrom<UploadRow> for Upload {
    type Error = StoreError;

    fn try_from(row: UploadRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse()
            .map_err(|e| serialization(format!("upload kind '{}': {}", row.kind, e)))?;
        Ok(Upload {
            id: row.id,
            kind,
            source_name: row.source_name,
            content: row.content,
            file_path: row.file_path,
            created_at: row.created_at,
        })
    }
}

/// Row in the `generation_jobs` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = generation_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Book identifier
    pub book_id: Uuid,
    /// Requested language code
    pub language: String,
    /// Generation mode, snake_case
    pub mode: String,
    /// Lifecycle state, lowercase
    pub status: String,
    /// Percent complete
    pub progress: i16,
    /// Failure reason
    pub error_message: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last change
    pub updated_at: DateTime<Utc>,
}

impl From<&GenerationJob> for JobRow {
    fn from(job: &GenerationJob) -> Self {
        Self {
            book_id: job.book_id,
            language: job.language.clone(),
            mode: job.mode.to_string(),
            status: job.status.to_string(),
            progress: i16::from(job.progress),
            error_message: job.error_message.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl TryFrom<JobRow> for GenerationJob {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let mode = row
            .mode
            .parse()
            .map_err(|e| serialization(format!("generation mode '{}': {}", row.mode, e)))?;
        let status = row
            .status
            .parse()
            .map_err(|e| serialization(format!("job status '{}': {}", row.status, e)))?;
        let progress = u8::try_from(row.progress)
            .map_err(|e| serialization(format!("job progress {}: {}", row.progress, e)))?;
        Ok(GenerationJob {
            book_id: row.book_id,
            language: row.language,
            mode,
            status,
            progress,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row in the `books` table. The artifact is stored whole as JSON.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookRow {
    /// Book identifier
    pub book_id: Uuid,
    /// Language code
    pub language: String,
    /// Serialized [`BookArtifact`]
    pub artifact: serde_json::Value,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&BookArtifact> for BookRow {
    type Error = StoreError;

    fn try_from(book: &BookArtifact) -> Result<Self, Self::Error> {
        Ok(Self {
            book_id: book.book_id,
            language: book.language.clone(),
            artifact: serde_json::to_value(book)?,
            created_at: Utc::now(),
        })
    }
}

impl TryFrom<BookRow> for BookArtifact {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(row.artifact)?)
    }
}

/// Row in the `chapters` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chapters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChapterRow {
    /// Record identifier
    pub chapter_id: Uuid,
    /// Requested chapter number
    pub chapter_number: i32,
    /// Requested chapter title
    pub chapter_title: String,
    /// Language code
    pub language: String,
    /// Generated text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&ChapterRecord> for ChapterRow {
    type Error = StoreError;

    fn try_from(chapter: &ChapterRecord) -> Result<Self, Self::Error> {
        let chapter_number = i32::try_from(chapter.chapter_number).map_err(|e| {
            serialization(format!("chapter number {}: {}", chapter.chapter_number, e))
        })?;
        Ok(Self {
            chapter_id: chapter.chapter_id,
            chapter_number,
            chapter_title: chapter.chapter_title.clone(),
            language: chapter.language.clone(),
            content: chapter.content.clone(),
            created_at: chapter.created_at,
        })
    }
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = StoreError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let chapter_number = u32::try_from(row.chapter_number)
            .map_err(|e| serialization(format!("chapter number {}: {}", row.chapter_number, e)))?;
        Ok(ChapterRecord {
            chapter_id: row.chapter_id,
            chapter_number,
            chapter_title: row.chapter_title,
            language: row.language,
            content: row.content,
            created_at: row.created_at,
        })
    }
}
