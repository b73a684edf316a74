//! Service description and language listing.

use axum::Json;
use bollybook_core::list_all;
use serde::Serialize;
use serde_json::{Value, json};

/// `GET /api/`
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Bollywood Cloud Computing Book Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload_slides": "/api/upload/slides",
            "upload_notes": "/api/upload/notes",
            "process_youtube": "/api/youtube/process",
            "generate_book": "/api/generate/book",
            "generate_chapter": "/api/generate/chapter",
            "download": "/api/download/{format}/{book_id}",
            "generation_status": "/api/generation/status/{book_id}",
            "languages": "/api/languages"
        }
    }))
}

/// One selectable language.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    /// Language code
    pub code: &'static str,
    /// Display name
    pub name: &'static str,
}

/// Body of `GET /api/languages`.
#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    /// Supported languages in registration order
    pub languages: Vec<LanguageEntry>,
}

/// `GET /api/languages`
pub async fn languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: list_all()
            .iter()
            .map(|p| LanguageEntry {
                code: p.code,
                name: p.display_name,
            })
            .collect(),
    })
}
