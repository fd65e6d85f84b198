//! Shared test fixtures for integration tests.
//!
//! Every fixture builds from the built-in corpus and default rules with the
//! simulated response delay disabled, so tests run instantly.

use axum::Router;
use docqa::http::{AppState, create_router};
use docqa::search::{Ranker, RankingPolicy, ResultMode};
use docqa::{Config, CorpusStore, LexicalScorer, SearchService, TemplateSynthesizer};
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

/// Default configuration: best-only results, 0.3 threshold.
#[fixture]
pub fn service() -> SearchService {
    SearchService::from_config(&Config::default(), Arc::new(CorpusStore::builtin()))
        .with_response_delay(Duration::ZERO)
}

/// Same rules, returning up to `top_k` results ordered by score.
#[fixture]
#[allow(dead_code)] // Used by the search tests only
pub fn top_k_service(#[default(10)] top_k: usize) -> SearchService {
    let config = Config::default();
    let policy = RankingPolicy {
        mode: ResultMode::TopK,
        top_k,
        ..RankingPolicy::default()
    };
    let ranker = Ranker::new(
        Arc::new(LexicalScorer::new(config.rules.topics.clone())),
        policy,
    );
    SearchService::new(
        Arc::new(CorpusStore::builtin()),
        ranker,
        Arc::new(TemplateSynthesizer::new(&config.rules)),
    )
}

#[fixture]
#[allow(dead_code)] // Used by the HTTP tests only
pub fn app(service: SearchService) -> Router {
    create_router(AppState::new(service))
}
