//! HTTP JSON API using Axum.

pub mod errors;
pub mod handlers;
pub mod models;

use crate::metadata::MetadataStore;
use crate::service::SearchService;
use axum::Router;
use axum::routing::{delete, get, post};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchService,
    /// Uploaded document records, unrelated to the search corpus
    pub metadata: Arc<MetadataStore>,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search,
            metadata: Arc::new(MetadataStore::new()),
        }
    }
}

/// Build the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/search", post(handlers::search))
        .route("/api/documents", get(handlers::list_documents))
        .route("/api/documents/upload", post(handlers::upload_document))
        .route("/api/documents/{id}", delete(handlers::delete_document))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP API listening");
    }
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
