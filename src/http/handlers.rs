//! Route handlers for the HTTP API.

use super::AppState;
use super::errors::{ApiError, search_status};
use super::models::{
    DeleteDocumentResponse, DocumentListResponse, SearchBody, UploadDocumentResponse,
};
use crate::metadata::UploadRequest;
use crate::types::{Query, SearchOutcome};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{StatusCode, header};
use serde_json::json;

/// Multipart part carrying the uploaded file.
const DOCUMENT_FIELD: &str = "document";

/// `POST /api/search`
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> (StatusCode, Json<SearchOutcome>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Rejected search body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(SearchOutcome::failed("", rejection.body_text())),
            );
        }
    };

    let query = Query::new(body.query.unwrap_or_default())
        .with_documents(body.documents.unwrap_or_default());
    match state.search.search(&query).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)),
        Err(error) => (
            search_status(&error),
            Json(SearchOutcome::failed(query.text, error)),
        ),
    }
}

/// `POST /api/documents/upload`
///
/// Accepts a `multipart/form-data` upload with a `document` file part, a
/// JSON body of metadata fields, or no body at all. Anything missing is
/// generated.
pub async fn upload_document(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<UploadDocumentResponse>, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let upload = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        read_multipart_upload(multipart).await?
    } else {
        let body = Bytes::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if body.is_empty() {
            UploadRequest::default()
        } else {
            serde_json::from_slice(&body)
                .map_err(|e| ApiError::BadRequest(format!("Invalid upload body: {}", e)))?
        }
    };

    let document = state.metadata.upload(upload).await;
    Ok(Json(UploadDocumentResponse {
        success: true,
        document: Some(document),
        error: None,
    }))
}

/// Metadata of the `document` part; other parts are ignored.
async fn read_multipart_upload(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    let mut upload = UploadRequest::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }
        upload.filename = field.file_name().map(str::to_string);
        upload.content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        upload.size = Some(bytes.len() as u64);
    }
    Ok(upload)
}

/// `GET /api/documents`
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        success: true,
        documents: state.metadata.list().await,
    })
}

/// `DELETE /api/documents/{id}`
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteDocumentResponse>, ApiError> {
    state.metadata.delete(&id).await?;
    Ok(Json(DeleteDocumentResponse {
        success: true,
        message: "Document deleted successfully".to_string(),
    }))
}

/// `GET /api/ping`
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "message": "pong" }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let corpus = state.search.corpus();
    Json(json!({
        "status": "ok",
        "documents": corpus.len(),
        "excerpts": corpus.excerpt_count(),
        "uploads": state.metadata.len().await,
    }))
}
