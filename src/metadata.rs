//! In-memory registry of uploaded document metadata.
//!
//! Upload, list and delete only manage these records. Text extraction is not
//! implemented, so nothing here feeds the searchable corpus.

use crate::error::MetadataError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Generated sizes fall in `[MIN_GENERATED_SIZE, MAX_GENERATED_SIZE)` bytes.
const MIN_GENERATED_SIZE: u64 = 100_000;
const MAX_GENERATED_SIZE: u64 = 5_100_000;

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub id: String,
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
}

/// Client-supplied fields of an upload; anything missing is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub filename: Option<String>,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// Metadata records in upload order.
#[derive(Debug, Default)]
pub struct MetadataStore {
    documents: RwLock<Vec<DocumentMetadata>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new upload and return its metadata.
    pub async fn upload(&self, request: UploadRequest) -> DocumentMetadata {
        let uploaded_at = Utc::now();
        let filename = request
            .filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("document_{}.pdf", uploaded_at.timestamp_millis()));
        let size = request
            .size
            .unwrap_or_else(|| rand::thread_rng().gen_range(MIN_GENERATED_SIZE..MAX_GENERATED_SIZE));

        let metadata = DocumentMetadata {
            id: uuid::Uuid::new_v4().simple().to_string(),
            filename,
            size,
            content_type: request
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            uploaded_at,
            status: DocumentStatus::Ready,
        };

        self.documents.write().await.push(metadata.clone());
        tracing::info!(id = %metadata.id, filename = %metadata.filename, "Document uploaded");
        metadata
    }

    pub async fn list(&self) -> Vec<DocumentMetadata> {
        self.documents.read().await.clone()
    }

    pub async fn delete(&self, id: &str) -> Result<DocumentMetadata, MetadataError> {
        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| MetadataError::NotFound(id.to_string()))?;

        let removed = documents.remove(position);
        tracing::info!(id, "Document deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[tokio::test]
    async fn test_upload_generates_missing_fields() {
        let store = MetadataStore::new();
        let doc = store.upload(UploadRequest::default()).await;

        check!(doc.filename.starts_with("document_"));
        check!(doc.filename.ends_with(".pdf"));
        check!((MIN_GENERATED_SIZE..MAX_GENERATED_SIZE).contains(&doc.size));
        check!(doc.content_type == DEFAULT_CONTENT_TYPE);
        check!(doc.status == DocumentStatus::Ready);
        check!(!doc.id.is_empty());
    }

    #[tokio::test]
    async fn test_upload_keeps_supplied_fields() {
        let store = MetadataStore::new();
        let doc = store
            .upload(UploadRequest {
                filename: Some("Handbook.docx".to_string()),
                size: Some(42),
                content_type: Some("application/msword".to_string()),
            })
            .await;

        check!(doc.filename == "Handbook.docx");
        check!(doc.size == 42);
        check!(doc.content_type == "application/msword");
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let store = MetadataStore::new();
        let first = store.upload(UploadRequest::default()).await;
        let second = store.upload(UploadRequest::default()).await;
        check!(first.id != second.id);
        check!(store.len().await == 2);

        let removed = store.delete(&first.id).await.unwrap();
        check!(removed == first);
        check!(store.list().await == vec![second]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = MetadataStore::new();
        let result = store.delete("missing").await;
        check!(result == Err(MetadataError::NotFound("missing".to_string())));
    }

    #[test]
    fn test_wire_format() {
        let doc = DocumentMetadata {
            id: "abc".to_string(),
            filename: "a.pdf".to_string(),
            size: 1,
            content_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
            status: DocumentStatus::Processing,
        };
        let json = serde_json::to_value(&doc).unwrap();
        check!(json["type"] == "application/pdf");
        check!(json["status"] == "processing");
        check!(json.get("uploadedAt").is_some());
    }
}
