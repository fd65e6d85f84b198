//! Request and response bodies for the HTTP API.

use crate::metadata::DocumentMetadata;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`.
///
/// A missing or null query is treated like an empty one so it gets the same
/// validation error.
#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: Option<String>,
    /// Document ids to search; absent or empty means all
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UploadDocumentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub success: bool,
    pub documents: Vec<DocumentMetadata>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDocumentResponse {
    pub success: bool,
    pub message: String,
}
