use anyhow::Context as _;
use clap::Parser;
use docqa::cli::{Cli, Commands};
use docqa::http::{self, AppState};
use docqa::server::DocServer;
use docqa::{Config, CorpusStore, Query, SearchService};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docqa::tracing::init(cli.log_json);

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let corpus = match &config.corpus {
        Some(path) => CorpusStore::load(path)
            .with_context(|| format!("Failed to load corpus from {}", path.display()))?,
        None => CorpusStore::builtin(),
    };
    tracing::info!(
        documents = corpus.len(),
        excerpts = corpus.excerpt_count(),
        "Corpus loaded"
    );
    let service = SearchService::from_config(&config, Arc::new(corpus));

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or(config.server.bind);
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            http::serve(listener, AppState::new(service), shutdown_signal()).await?;
            tracing::info!("HTTP API stopped");
        }
        Commands::Mcp => {
            tracing::info!("Starting docqa MCP server");
            let server = DocServer::new(service);
            let running = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;
            running.waiting().await?;
        }
        Commands::Search {
            query,
            documents,
            json,
        } => {
            let outcome = service
                .handle_search(&Query::new(query).with_documents(documents))
                .await;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", docqa::format::format_search_outcome(&outcome));
            }
            if !outcome.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
