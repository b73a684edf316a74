//! Request handlers, one module per endpoint group.

pub mod download;
pub mod generate;
pub mod info;
pub mod upload;

use crate::AppState;
use bollybook_error::BollybookResult;

/// Uploads read when a generation asks for uploaded content.
pub const REFERENCE_UPLOAD_LIMIT: usize = 100;

/// Stored upload texts joined by blank lines, or empty when not requested.
pub(crate) async fn uploaded_reference(
    state: &AppState,
    use_uploaded_content: bool,
) -> BollybookResult<String> {
    if !use_uploaded_content {
        return Ok(String::new());
    }
    let uploads = state.store.list_uploads(REFERENCE_UPLOAD_LIMIT).await?;
    tracing::debug!(count = uploads.len(), "Using uploaded content as reference");
    Ok(uploads
        .iter()
        .map(|u| u.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn default_language() -> String {
    "english".to_string()
}
