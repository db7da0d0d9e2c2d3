//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_domain::error::DomainError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and client-facing message for a [`DomainError`].
pub(crate) fn classify(err: &DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Parse(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::NotConnected => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        DomainError::Transport(inner) => {
            tracing::error!(error = %inner, "transport error");
            (StatusCode::BAD_GATEWAY, "transport error".to_string())
        }
    }
}

/// Maps [`DomainError`] to an HTTP response with appropriate status code.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
