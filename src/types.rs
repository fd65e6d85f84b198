use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A search request: query text plus an optional document-id scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    /// Empty means every document.
    pub document_ids: AHashSet<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document_ids: AHashSet::new(),
        }
    }

    pub fn with_documents(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.document_ids.extend(ids.into_iter().map(Into::into));
        self
    }
}

/// One excerpt with its relevance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredExcerpt {
    pub document_id: String,
    pub filename: String,
    pub excerpt: String,
    pub relevance_score: f32,
    /// 1-based position of the excerpt within its document
    pub page_number: u32,
}

/// The full response to a search, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub success: bool,
    pub query: String,
    pub results: Vec<ScoredExcerpt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn found(query: impl Into<String>, results: Vec<ScoredExcerpt>, summary: String) -> Self {
        Self {
            success: true,
            query: query.into(),
            results,
            summary: Some(summary),
            error: None,
        }
    }

    /// A failed search never carries results or a summary.
    pub fn failed(query: impl Into<String>, error: impl ToString) -> Self {
        Self {
            success: false,
            query: query.into(),
            results: vec![],
            summary: None,
            error: Some(error.to_string()),
        }
    }
}
