//! Process-local job store.

use async_trait::async_trait;
use bollybook_core::{BookArtifact, ChapterRecord, GenerationJob, JobStatus, Upload};
use bollybook_error::{BollybookResult, StoreError, StoreErrorKind};
use bollybook_interface::JobStore;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Job store backed by in-process maps.
///
/// Uploads keep their insertion order so [`JobStore::list_uploads`] returns
/// the oldest first. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    uploads: RwLock<Vec<Upload>>,
    jobs: RwLock<HashMap<Uuid, GenerationJob>>,
    books: RwLock<HashMap<Uuid, BookArtifact>>,
    chapters: RwLock<HashMap<Uuid, ChapterRecord>>,
}

impl InMemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every job, in no particular order.
    pub async fn jobs(&self) -> Vec<GenerationJob> {
        self.jobs.read().await.values().cloned().collect()
    }

    async fn modify_job<F>(&self, book_id: Uuid, f: F) -> BollybookResult<()>
    where
        F: FnOnce(&mut GenerationJob),
    {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&book_id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound("Job".to_string())))?;
        f(job);
        job.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    #[instrument(skip(self, upload), fields(upload_id = %upload.id, kind = %upload.kind))]
    async fn save_upload(&self, upload: &Upload) -> BollybookResult<()> {
        let mut uploads = self.uploads.write().await;
        match uploads.iter_mut().find(|u| u.id == upload.id) {
            Some(existing) => *existing = upload.clone(),
            None => uploads.push(upload.clone()),
        }
        debug!(count = uploads.len(), "Upload stored");
        Ok(())
    }

    async fn list_uploads(&self, limit: usize) -> BollybookResult<Vec<Upload>> {
        let uploads = self.uploads.read().await;
        Ok(uploads.iter().take(limit).cloned().collect())
    }

    #[instrument(skip(self, job), fields(book_id = %job.book_id))]
    async fn create_job(&self, job: &GenerationJob) -> BollybookResult<()> {
        self.jobs.write().await.insert(job.book_id, job.clone());
        Ok(())
    }

    async fn update_job_progress(&self, book_id: Uuid, progress: u8) -> BollybookResult<()> {
        self.modify_job(book_id, |job| job.progress = progress.min(100))
            .await
    }

    #[instrument(skip(self))]
    async fn complete_job(&self, book_id: Uuid) -> BollybookResult<()> {
        self.modify_job(book_id, |job| {
            job.status = JobStatus::Completed;
            job.progress = 100;
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fail_job(&self, book_id: Uuid, message: &str) -> BollybookResult<()> {
        self.modify_job(book_id, |job| {
            job.status = JobStatus::Failed;
            job.error_message = Some(message.to_string());
        })
        .await
    }

    async fn get_job(&self, book_id: Uuid) -> BollybookResult<Option<GenerationJob>> {
        Ok(self.jobs.read().await.get(&book_id).cloned())
    }

    #[instrument(skip(self, book), fields(book_id = %book.book_id))]
    async fn save_book(&self, book: &BookArtifact) -> BollybookResult<()> {
        self.books.write().await.insert(book.book_id, book.clone());
        Ok(())
    }

    async fn get_book(&self, book_id: Uuid) -> BollybookResult<Option<BookArtifact>> {
        Ok(self.books.read().await.get(&book_id).cloned())
    }

    #[instrument(skip(self, chapter), fields(chapter_id = %chapter.chapter_id))]
    async fn save_chapter(&self, chapter: &ChapterRecord) -> BollybookResult<()> {
        self.chapters
            .write()
            .await
            .insert(chapter.chapter_id, chapter.clone());
        Ok(())
    }

    async fn get_chapter(&self, chapter_id: Uuid) -> BollybookResult<Option<ChapterRecord>> {
        Ok(self.chapters.read().await.get(&chapter_id).cloned())
    }
}
