//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docqa plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Failure of a single search request.
///
/// The `Display` text is what callers see; internal causes are logged at the
/// service boundary and never leaked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The query was missing or whitespace-only.
    #[error("Query cannot be empty")]
    EmptyQuery,
    /// Scoring, ranking or synthesis failed unexpectedly.
    #[error("Search processing failed")]
    Processing,
    /// The configured deadline elapsed before an outcome was ready.
    #[error("Search deadline exceeded")]
    DeadlineExceeded,
    /// The caller cancelled the search.
    #[error("Search cancelled")]
    Cancelled,
}

/// Error returned when loading or validating configuration fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Error returned when loading a corpus file fails.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Failed to read corpus file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse corpus file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Duplicate document id '{0}' in corpus")]
    DuplicateId(String),
}

/// Error returned by the document metadata store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("Document not found")]
    NotFound(String),
}
