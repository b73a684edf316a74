//! Rendered book downloads.

use crate::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use bollybook_error::{RenderError, RenderErrorKind};
use bollybook_render::{OutputFormat, render, write_atomic};
use std::str::FromStr;
use uuid::Uuid;

/// `GET /api/download/{format}/{book_id}`
///
/// The format is validated before the book is looked up. The rendered file
/// is also kept in the output directory.
#[tracing::instrument(skip(state))]
pub async fn download_book(
    State(state): State<AppState>,
    Path((format, book_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let format = OutputFormat::from_str(&format)
        .map_err(|_| ApiError::validation("Format must be pdf, docx, or md"))?;
    let book_id = Uuid::parse_str(&book_id).map_err(|_| ApiError::not_found("Book"))?;
    let book = state
        .store
        .get_book(book_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Book"))?;

    let filename = format.filename(book_id);
    let path = state.output_dir.join(&filename);
    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, RenderError> {
        let bytes = render(format, &book)?;
        write_atomic(&path, &bytes)?;
        Ok(bytes)
    })
    .await
    .map_err(|e| RenderError::new(RenderErrorKind::Io(format!("render task failed: {}", e))))??;

    tracing::info!(%book_id, %format, size = bytes.len(), "Book rendered");
    Ok((
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
