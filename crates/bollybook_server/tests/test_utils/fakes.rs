//! Transcript sources and stores for testing.

use async_trait::async_trait;
use bollybook_core::{BookArtifact, ChapterRecord, GenerationJob, Upload};
use bollybook_database::InMemoryJobStore;
use bollybook_error::{
    BollybookResult, ExtractError, ExtractErrorKind, StoreError, StoreErrorKind,
};
use bollybook_interface::{JobStore, TranscriptEntry, TranscriptSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Returns the same three captions for every video, out of order.
#[derive(Debug, Default)]
pub struct FakeTranscripts;

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch(&self, _video_id: &str) -> BollybookResult<Vec<TranscriptEntry>> {
        Ok(vec![
            TranscriptEntry {
                start: 4.0,
                text: "scale out".to_string(),
            },
            TranscriptEntry {
                start: 0.0,
                text: "Namaste cloud".to_string(),
            },
            TranscriptEntry {
                start: 2.0,
                text: "students".to_string(),
            },
        ])
    }
}

/// Fails every fetch.
#[derive(Debug, Default)]
pub struct UnavailableTranscripts;

#[async_trait]
impl TranscriptSource for UnavailableTranscripts {
    async fn fetch(&self, video_id: &str) -> BollybookResult<Vec<TranscriptEntry>> {
        Err(ExtractError::new(ExtractErrorKind::TranscriptUnavailable(format!(
            "captions disabled for {}",
            video_id
        )))
        .into())
    }
}

/// Delegates to an in-memory store but fails the first `complete_job` calls.
pub struct FlakyStore {
    inner: Arc<InMemoryJobStore>,
    completion_failures: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new(inner: Arc<InMemoryJobStore>, completion_failures: usize) -> Self {
        Self {
            inner,
            completion_failures: AtomicUsize::new(completion_failures),
        }
    }
}

#[async_trait]
impl JobStore for FlakyStore {
    async fn save_upload(&self, upload: &Upload) -> BollybookResult<()> {
        self.inner.save_upload(upload).await
    }

    async fn list_uploads(&self, limit: usize) -> BollybookResult<Vec<Upload>> {
        self.inner.list_uploads(limit).await
    }

    async fn create_job(&self, job: &GenerationJob) -> BollybookResult<()> {
        self.inner.create_job(job).await
    }

    async fn update_job_progress(&self, book_id: Uuid, progress: u8) -> BollybookResult<()> {
        self.inner.update_job_progress(book_id, progress).await
    }

    async fn complete_job(&self, book_id: Uuid) -> BollybookResult<()> {
        let remaining = self.completion_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.completion_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::new(StoreErrorKind::Query("connection reset".to_string())).into());
        }
        self.inner.complete_job(book_id).await
    }

    async fn fail_job(&self, book_id: Uuid, message: &str) -> BollybookResult<()> {
        self.inner.fail_job(book_id, message).await
    }

    async fn get_job(&self, book_id: Uuid) -> BollybookResult<Option<GenerationJob>> {
        self.inner.get_job(book_id).await
    }

    async fn save_book(&self, book: &BookArtifact) -> BollybookResult<()> {
        self.inner.save_book(book).await
    }

    async fn get_book(&self, book_id: Uuid) -> BollybookResult<Option<BookArtifact>> {
        self.inner.get_book(book_id).await
    }

    async fn save_chapter(&self, chapter: &ChapterRecord) -> BollybookResult<()> {
        self.inner.save_chapter(chapter).await
    }

    async fn get_chapter(&self, chapter_id: Uuid) -> BollybookResult<Option<ChapterRecord>> {
        self.inner.get_chapter(chapter_id).await
    }
}
