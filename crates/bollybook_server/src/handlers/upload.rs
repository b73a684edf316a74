//! Slide, note and YouTube ingestion.

use crate::{ApiError, AppState};
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use bollybook_core::{Upload, UploadKind, word_count};
use bollybook_error::ExtractError;
use bollybook_extract::{DocumentType, extract_text, get_transcript};
use bollybook_render::write_atomic;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SLIDE_TYPES: &[DocumentType] = &[DocumentType::Pdf, DocumentType::Pptx, DocumentType::Docx];
const NOTE_TYPES: &[DocumentType] = &[DocumentType::Txt, DocumentType::Pdf, DocumentType::Docx];

/// Body of `POST /api/upload/slides`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidesResponse {
    /// Upload id
    pub id: Uuid,
    /// Human-readable status
    pub message: String,
    /// Original filename
    pub filename: String,
    /// Blank-line-separated blocks in the extracted text
    pub pages_extracted: usize,
}

/// Body of `POST /api/upload/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResponse {
    /// Upload id
    pub id: Uuid,
    /// Human-readable status
    pub message: String,
    /// Original filename
    pub filename: String,
    /// Words in the extracted text
    pub word_count: usize,
}

/// Form of `POST /api/youtube/process`.
#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeForm {
    /// Video or playlist URL
    pub youtube_url: String,
}

/// Body of `POST /api/youtube/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeResponse {
    /// Upload id
    pub id: Uuid,
    /// Human-readable status
    pub message: String,
    /// Submitted URL
    pub url: String,
    /// Words in the transcript
    pub word_count: usize,
}

struct Received {
    upload: Upload,
    filename: String,
    text: String,
}

/// Save the multipart `file` field, extract its text and store the upload.
async fn receive(
    state: &AppState,
    mut multipart: Multipart,
    kind: UploadKind,
    allowed: &[DocumentType],
    unsupported_message: &str,
) -> Result<Received, ApiError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            file = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) = file.ok_or_else(|| ApiError::validation("No file uploaded"))?;

    let doc_type = DocumentType::from_filename(&filename)
        .filter(|t| allowed.contains(t))
        .ok_or_else(|| ApiError::validation(unsupported_message))?;

    let id = Uuid::new_v4();
    let path = state.upload_dir.join(format!("{}.{}", id, doc_type));
    tracing::info!(%id, %filename, %doc_type, size = bytes.len(), "Receiving upload");

    let saved_to = path.clone();
    let text = tokio::task::spawn_blocking(move || -> Result<String, ApiError> {
        write_atomic(&saved_to, &bytes)?;
        Ok(extract_text(&bytes, doc_type.as_ref())?)
    })
    .await
    .map_err(|e| ExtractError::failure(doc_type.to_string().to_uppercase(), e))??;

    let mut upload = Upload::new(
        kind,
        filename.clone(),
        &text,
        Some(path.display().to_string()),
    );
    upload.id = id;
    state.store.save_upload(&upload).await?;

    Ok(Received {
        upload,
        filename,
        text,
    })
}

/// `POST /api/upload/slides`
#[tracing::instrument(skip_all)]
pub async fn upload_slides(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SlidesResponse>, ApiError> {
    let received = receive(
        &state,
        multipart?,
        UploadKind::Slides,
        SLIDE_TYPES,
        "Unsupported file format. Use PDF, PPTX, or DOCX.",
    )
    .await?;

    Ok(Json(SlidesResponse {
        id: received.upload.id,
        message: "Slides uploaded successfully".to_string(),
        filename: received.filename,
        pages_extracted: received.text.split("\n\n").count(),
    }))
}

/// `POST /api/upload/notes`
#[tracing::instrument(skip_all)]
pub async fn upload_notes(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<NotesResponse>, ApiError> {
    let received = receive(
        &state,
        multipart?,
        UploadKind::Notes,
        NOTE_TYPES,
        "Unsupported file format. Use TXT, PDF, or DOCX.",
    )
    .await?;

    Ok(Json(NotesResponse {
        id: received.upload.id,
        message: "Notes uploaded successfully".to_string(),
        filename: received.filename,
        word_count: word_count(&received.text),
    }))
}

/// Read `youtube_url` from either a urlencoded or a multipart form.
async fn youtube_url(state: &AppState, request: Request) -> Result<String, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(form) = Form::<YoutubeForm>::from_request(request, state).await?;
        return Ok(form.youtube_url);
    }

    let mut multipart = Multipart::from_request(request, state).await?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("youtube_url") {
            return Ok(field.text().await?);
        }
    }
    Err(ApiError::validation("Missing form field: youtube_url"))
}

/// `POST /api/youtube/process`
#[tracing::instrument(skip_all)]
pub async fn process_youtube(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<YoutubeResponse>, ApiError> {
    let url = youtube_url(&state, request).await?;
    let transcript = get_transcript(&url, state.transcripts.as_ref()).await?;

    let upload = Upload::new(UploadKind::Youtube, url.clone(), &transcript, None);
    state.store.save_upload(&upload).await?;
    tracing::info!(id = %upload.id, %url, "YouTube transcript stored");

    Ok(Json(YoutubeResponse {
        id: upload.id,
        message: "YouTube transcript extracted successfully".to_string(),
        url,
        word_count: word_count(&transcript),
    }))
}
