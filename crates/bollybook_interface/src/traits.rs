//! Trait definitions for the pipeline's external collaborators.

use crate::{AssemblyStep, TranscriptEntry};
use async_trait::async_trait;
use bollybook_core::{
    BookArtifact, ChapterRecord, GenerateRequest, GenerateResponse, GenerationJob, Upload,
};
use bollybook_error::BollybookResult;
use uuid::Uuid;

/// Core trait that every LLM backend implements.
#[async_trait]
pub trait BollybookDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> BollybookResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o").
    fn model_name(&self) -> &str;
}

/// Source of timed captions for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the caption entries for `video_id`, in any order.
    async fn fetch(&self, video_id: &str) -> BollybookResult<Vec<TranscriptEntry>>;
}

/// Receives progress notifications while a book is assembled.
///
/// `completed` counts finished steps out of `total`; the title page, the
/// table of contents and each chapter are one step apiece.
#[async_trait]
pub trait AssemblyObserver: Send + Sync {
    /// Called after each step completes.
    async fn on_step(&self, step: AssemblyStep, completed: usize, total: usize);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

#[async_trait]
impl AssemblyObserver for NoopObserver {
    async fn on_step(&self, _step: AssemblyStep, _completed: usize, _total: usize) {}
}

/// Persistence for uploads, jobs, books and single chapters.
///
/// Lookups of unknown ids return `Ok(None)`; errors are reserved for
/// backend failures. Status-changing calls on an unknown job return a
/// `NotFound` store error.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Store an upload record.
    async fn save_upload(&self, upload: &Upload) -> BollybookResult<()>;

    /// Up to `limit` uploads, oldest first.
    async fn list_uploads(&self, limit: usize) -> BollybookResult<Vec<Upload>>;

    /// Store a new job record.
    async fn create_job(&self, job: &GenerationJob) -> BollybookResult<()>;

    /// Set the progress of a running job.
    async fn update_job_progress(&self, book_id: Uuid, progress: u8) -> BollybookResult<()>;

    /// Mark a job completed at 100%.
    async fn complete_job(&self, book_id: Uuid) -> BollybookResult<()>;

    /// Mark a job failed and record why.
    async fn fail_job(&self, book_id: Uuid, message: &str) -> BollybookResult<()>;

    /// Look up a job.
    async fn get_job(&self, book_id: Uuid) -> BollybookResult<Option<GenerationJob>>;

    /// Store a finished book.
    async fn save_book(&self, book: &BookArtifact) -> BollybookResult<()>;

    /// Look up a finished book.
    async fn get_book(&self, book_id: Uuid) -> BollybookResult<Option<BookArtifact>>;

    /// Store a single generated chapter.
    async fn save_chapter(&self, chapter: &ChapterRecord) -> BollybookResult<()>;

    /// Look up a single generated chapter.
    async fn get_chapter(&self, chapter_id: Uuid) -> BollybookResult<Option<ChapterRecord>>;
}
