//! Book and chapter generation, and job status.

use super::{default_language, uploaded_reference};
use crate::{ApiError, AppState, JobProgressObserver};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use bollybook_core::{ChapterRecord, GenerationJob, GenerationMode, JobStatus};
use bollybook_error::{BollybookError, BollybookResult, GenerationError, GenerationErrorKind};
use bollybook_extract::get_transcript;
use bollybook_narrative::DEFAULT_CHAPTER_PAGES;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

/// Body of `POST /api/generate/book`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    /// Language code; unknown codes fall back to English
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested mode, recorded on the job
    #[serde(default)]
    pub generation_mode: GenerationMode,
    /// Video whose transcript is appended to the reference text
    #[serde(default)]
    pub youtube_url: Option<String>,
    /// Seed prompts with stored uploads
    #[serde(default)]
    pub use_uploaded_content: bool,
}

/// Response of `POST /api/generate/book`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    /// Response id
    pub id: Uuid,
    /// `success`
    pub status: String,
    /// Human-readable status
    pub message: String,
    /// Id for download and status lookups
    pub book_id: Uuid,
}

/// Body of `POST /api/generate/chapter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRequest {
    /// Language code; unknown codes fall back to English
    #[serde(default = "default_language")]
    pub language: String,
    /// Chapter number used in the prompt
    pub chapter_number: u32,
    /// Chapter title used in the prompt
    pub chapter_title: String,
    /// Seed the prompt with stored uploads
    #[serde(default)]
    pub use_uploaded_content: bool,
}

/// Response of `POST /api/generate/chapter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterResponse {
    /// Stored chapter id
    pub chapter_id: Uuid,
    /// `success`
    pub status: String,
    /// Human-readable status
    pub message: String,
    /// Generated text
    pub content: String,
}

/// Response of `GET /api/generation/status/{book_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStatus {
    /// Book id
    pub book_id: Uuid,
    /// Job state
    pub status: JobStatus,
    /// Percent complete
    pub progress: u8,
    /// `Generation <status>`
    pub message: String,
}

/// Uploaded content plus the transcript of `youtube_url`, if any.
///
/// A transcript failure is logged and the book proceeds without it.
async fn book_reference(state: &AppState, request: &BookRequest) -> BollybookResult<String> {
    let mut reference = uploaded_reference(state, request.use_uploaded_content).await?;

    if let Some(url) = request.youtube_url.as_deref().filter(|u| !u.trim().is_empty()) {
        match get_transcript(url, state.transcripts.as_ref()).await {
            Ok(transcript) => {
                if !reference.is_empty() {
                    reference.push_str("\n\n");
                }
                reference.push_str(&transcript);
            }
            Err(e) => tracing::warn!(%url, error = %e, "Could not process YouTube URL"),
        }
    }
    Ok(reference)
}

/// Assemble and store the book, moving the job to a terminal state.
async fn run_job(state: AppState, job: GenerationJob, reference: String) -> BollybookResult<()> {
    let observer = JobProgressObserver::new(state.store.clone(), job.book_id);
    let outcome = async {
        let book = state
            .assembler
            .assemble_with(job.book_id, &job.language, &reference, &observer)
            .await?;
        state.store.save_book(&book).await?;
        Ok::<_, BollybookError>(())
    }
    .await;

    match outcome {
        Ok(()) => finish_job(&state, job.book_id).await,
        Err(e) => {
            record_failure(&state, job.book_id, &e).await;
            Err(e)
        }
    }
}

/// Mark a stored book's job completed, retrying the write once.
///
/// If both writes fail the job is marked failed so it never stays
/// `generating`.
async fn finish_job(state: &AppState, book_id: Uuid) -> BollybookResult<()> {
    let first = match state.store.complete_job(book_id).await {
        Ok(()) => {
            tracing::info!(%book_id, "Book generation completed");
            return Ok(());
        }
        Err(e) => e,
    };
    tracing::warn!(%book_id, error = %first, "Failed to mark job completed; retrying");

    match state.store.complete_job(book_id).await {
        Ok(()) => {
            tracing::info!(%book_id, "Book generation completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%book_id, error = %e, "Book stored but job could not be completed");
            record_failure(state, book_id, &e).await;
            Err(e)
        }
    }
}

async fn record_failure(state: &AppState, book_id: Uuid, error: &BollybookError) {
    if let Err(store_err) = state.store.fail_job(book_id, &error.detail()).await {
        tracing::error!(%book_id, error = %store_err, "Failed to record job failure");
    }
}

/// `POST /api/generate/book`
///
/// Runs the whole assembly before responding. The work runs on its own task,
/// so the job still reaches a terminal state if the client disconnects.
#[tracing::instrument(skip_all)]
pub async fn generate_book(
    State(state): State<AppState>,
    request: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Json(request) = request?;
    let book_id = Uuid::new_v4();
    let reference = book_reference(&state, &request).await?;

    let job = GenerationJob::start(book_id, request.language.clone(), request.generation_mode);
    state.store.create_job(&job).await?;

    tracing::info!(%book_id, language = %request.language, mode = %request.generation_mode, "Starting book generation");
    let task = tokio::spawn(run_job(state.clone(), job, reference).in_current_span());
    match task.await {
        Ok(result) => result?,
        Err(e) => {
            let err = BollybookError::from(GenerationError::new(GenerationErrorKind::Assembly(
                format!("generation task failed: {}", e),
            )));
            record_failure(&state, book_id, &err).await;
            return Err(err.into());
        }
    }

    Ok(Json(BookResponse {
        id: Uuid::new_v4(),
        status: "success".to_string(),
        message: "Book generated successfully".to_string(),
        book_id,
    }))
}

/// `POST /api/generate/chapter`
#[tracing::instrument(skip_all)]
pub async fn generate_chapter(
    State(state): State<AppState>,
    request: Result<Json<ChapterRequest>, JsonRejection>,
) -> Result<Json<ChapterResponse>, ApiError> {
    let Json(request) = request?;
    let reference = uploaded_reference(&state, request.use_uploaded_content).await?;

    let content = state
        .assembler
        .generate_chapter(
            &request.language,
            request.chapter_number,
            &request.chapter_title,
            DEFAULT_CHAPTER_PAGES,
            &reference,
        )
        .await?;

    let record = ChapterRecord {
        chapter_id: Uuid::new_v4(),
        chapter_number: request.chapter_number,
        chapter_title: request.chapter_title,
        language: request.language,
        content,
        created_at: Utc::now(),
    };
    state.store.save_chapter(&record).await?;

    Ok(Json(ChapterResponse {
        chapter_id: record.chapter_id,
        status: "success".to_string(),
        message: "Chapter generated successfully".to_string(),
        content: record.content,
    }))
}

/// `GET /api/generation/status/{book_id}`
#[tracing::instrument(skip(state))]
pub async fn generation_status(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<GenerationStatus>, ApiError> {
    let book_id = Uuid::parse_str(&book_id).map_err(|_| ApiError::not_found("Generation"))?;
    let job = state
        .store
        .get_job(book_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Generation"))?;

    Ok(Json(GenerationStatus {
        book_id,
        status: job.status,
        progress: job.progress,
        message: format!("Generation {}", job.status),
    }))
}
