//! API error types mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant maps to a status code and produces a JSON body
//! `{"success": false, "error": "message"}`.

use crate::error::{MetadataError, SearchError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Invalid request body (400).
    BadRequest(String),
    /// Resource not found (404).
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = axum::Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}

impl From<MetadataError> for ApiError {
    fn from(error: MetadataError) -> Self {
        match error {
            MetadataError::NotFound(_) => Self::NotFound(error.to_string()),
        }
    }
}

/// Status code for a failed search; the body is always a `SearchOutcome`.
pub const fn search_status(error: &SearchError) -> StatusCode {
    match error {
        SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
        SearchError::Processing => StatusCode::INTERNAL_SERVER_ERROR,
        SearchError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        SearchError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    }
}
