//! Route table and middleware.

use crate::AppState;
use crate::handlers::{download, generate, info, upload};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the `/api` router over `state`.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/api/", get(info::root))
        .route("/api/languages", get(info::languages))
        .route("/api/upload/slides", post(upload::upload_slides))
        .route("/api/upload/notes", post(upload::upload_notes))
        .route("/api/youtube/process", post(upload::process_youtube))
        .route("/api/generate/book", post(generate::generate_book))
        .route("/api/generate/chapter", post(generate::generate_chapter))
        .route(
            "/api/download/{format}/{book_id}",
            get(download::download_book),
        )
        .route(
            "/api/generation/status/{book_id}",
            get(generate::generation_status),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the configured origins.
///
/// `*` (or no origins) allows any origin without credentials. An explicit
/// list allows credentials and mirrors the requested methods and headers.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
