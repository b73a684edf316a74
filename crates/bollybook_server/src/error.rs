//! HTTP error responses.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bollybook_error::{
    BollybookError, BollybookErrorKind, ExtractError, ExtractErrorKind, GenerationError,
    RenderError, StoreError, StoreErrorKind, ValidationError,
};
use serde_json::json;

/// A failed request, rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-visible message.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// A 400 with `message`.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ValidationError::new(message).into()
    }

    /// A 404 for a missing `what`.
    #[track_caller]
    pub fn not_found(what: &str) -> Self {
        StoreError::new(StoreErrorKind::NotFound(what.to_string())).into()
    }
}

/// Status code for an error.
///
/// Bad input maps to 400, missing records to 404, recognized but
/// unimplemented input to 501 and everything else to 500.
pub fn status_for(err: &BollybookError) -> StatusCode {
    match err.kind() {
        BollybookErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
        BollybookErrorKind::Extract(e) => match e.kind {
            ExtractErrorKind::UnsupportedFormat(_) | ExtractErrorKind::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            ExtractErrorKind::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        BollybookErrorKind::Store(e) if matches!(e.kind, StoreErrorKind::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<BollybookError> for ApiError {
    fn from(err: BollybookError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            tracing::error!(status = %status, error = %err, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %err, "Request rejected");
        }
        Self {
            status,
            detail: err.detail(),
        }
    }
}

macro_rules! impl_from_domain_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(err: $ty) -> Self {
                    BollybookError::from(err).into()
                }
            }
        )*
    };
}

impl_from_domain_error!(
    ValidationError,
    ExtractError,
    GenerationError,
    RenderError,
    StoreError,
);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected JSON body");
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected form body");
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected multipart request");
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!(error = %err, "Rejected multipart body");
        Self {
            status: err.status(),
            detail: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
