//! Search orchestration: corpus selection, ranking, synthesis and the fault
//! boundary shared by every front end (HTTP, MCP, CLI).

use crate::answer::{AnswerSynthesizer, TemplateSynthesizer};
use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::error::SearchError;
use crate::search::{LexicalScorer, QueryTerms, Ranker};
use crate::types::{Query, SearchOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Answers queries against a shared, read-only corpus.
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct SearchService {
    corpus: Arc<CorpusStore>,
    ranker: Ranker,
    synthesizer: Arc<dyn AnswerSynthesizer>,
    /// Simulated inference latency before a successful response
    response_delay: Duration,
    /// Upper bound on a whole search
    deadline: Option<Duration>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("documents", &self.corpus.len())
            .field("ranker", &self.ranker)
            .field("response_delay", &self.response_delay)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// A service with no simulated delay and no deadline.
    pub fn new(
        corpus: Arc<CorpusStore>,
        ranker: Ranker,
        synthesizer: Arc<dyn AnswerSynthesizer>,
    ) -> Self {
        Self {
            corpus,
            ranker,
            synthesizer,
            response_delay: Duration::ZERO,
            deadline: None,
        }
    }

    /// Wire the lexical scorer and template synthesizer from validated config.
    pub fn from_config(config: &Config, corpus: Arc<CorpusStore>) -> Self {
        let scorer = LexicalScorer::new(config.rules.topics.clone());
        let ranker = Ranker::new(Arc::new(scorer), config.search.ranking_policy());
        let synthesizer = TemplateSynthesizer::new(&config.rules);

        Self::new(corpus, ranker, Arc::new(synthesizer))
            .with_response_delay(config.search.response_delay())
            .with_deadline(config.search.deadline())
    }

    #[must_use]
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub const fn corpus(&self) -> &Arc<CorpusStore> {
        &self.corpus
    }

    /// Run a search, folding any failure into an unsuccessful outcome.
    pub async fn handle_search(&self, query: &Query) -> SearchOutcome {
        match self.search(query).await {
            Ok(outcome) => outcome,
            Err(error) => SearchOutcome::failed(query.text.clone(), error),
        }
    }

    /// Run a search.
    ///
    /// Finding nothing is a success with an empty result list and the
    /// not-found summary.
    pub async fn search(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Run a search that stops early when `cancel` fires or the configured
    /// deadline passes.
    pub async fn search_with_cancel(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout(deadline, self.run(query))
                    .await
                    .unwrap_or_else(|_| {
                        tracing::warn!(?deadline, "Search deadline exceeded");
                        Err(SearchError::DeadlineExceeded)
                    }),
                None => self.run(query).await,
            }
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Search cancelled by caller");
                Err(SearchError::Cancelled)
            }
            result = bounded => result,
        }
    }

    async fn run(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        let text = query.text.trim();
        if text.is_empty() {
            tracing::debug!("Rejected empty query");
            return Err(SearchError::EmptyQuery);
        }

        let start = Instant::now();
        let corpus = Arc::clone(&self.corpus);
        let ranker = self.ranker.clone();
        let synthesizer = Arc::clone(&self.synthesizer);
        let text = text.to_string();
        let document_ids = query.document_ids.clone();

        // Scoring is CPU-bound; a panic there surfaces as a JoinError
        let (results, summary) = tokio::task::spawn_blocking(move || {
            let terms = QueryTerms::new(&text);
            let candidates = corpus.get_documents(Some(&document_ids));
            let results = ranker.rank(&terms, &candidates);
            let summary = synthesizer.synthesize(&text, results.first())?;
            anyhow::Ok((results, summary))
        })
        .await
        .map_err(|e| {
            tracing::error!("Search task failed: {}", e);
            SearchError::Processing
        })?
        .map_err(|e| {
            tracing::error!("Answer synthesis failed: {:#}", e);
            SearchError::Processing
        })?;

        // Only a found answer waits; not-found returns immediately
        if !results.is_empty() && !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }

        tracing::info!(
            results = results.len(),
            top_score = results.first().map(|r| r.relevance_score),
            elapsed = ?start.elapsed(),
            "Search completed"
        );

        Ok(SearchOutcome::found(query.text.clone(), results, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::rules::RuleSet;
    use crate::search::{RankingPolicy, RelevanceScorer};
    use crate::types::ScoredExcerpt;
    use assert2::check;
    use rstest::rstest;

    struct PanickingScorer;

    impl RelevanceScorer for PanickingScorer {
        fn score(&self, _query: &QueryTerms, _excerpt: &str) -> f32 {
            panic!("scorer exploded")
        }
    }

    struct FailingSynthesizer;

    impl AnswerSynthesizer for FailingSynthesizer {
        fn synthesize(&self, _query: &str, _top: Option<&ScoredExcerpt>) -> Result<String> {
            anyhow::bail!("model unavailable")
        }
    }

    fn service() -> SearchService {
        let config = Config::default().validated().unwrap();
        SearchService::from_config(&config, Arc::new(CorpusStore::builtin()))
            .with_response_delay(Duration::ZERO)
    }

    fn template_synthesizer() -> Arc<dyn AnswerSynthesizer> {
        Arc::new(TemplateSynthesizer::new(&RuleSet::default()))
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    #[tokio::test]
    async fn test_empty_query_rejected(#[case] text: &str) {
        let result = service().search(&Query::new(text)).await;
        check!(result == Err(SearchError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_outcome_echoes_raw_query() {
        let outcome = service().search(&Query::new("  remote work ")).await.unwrap();
        check!(outcome.query == "  remote work ");
        check!(outcome.results.len() == 1);
    }

    #[tokio::test]
    async fn test_scorer_panic_becomes_processing_error() {
        let service = SearchService::new(
            Arc::new(CorpusStore::builtin()),
            Ranker::new(Arc::new(PanickingScorer), RankingPolicy::default()),
            template_synthesizer(),
        );
        let outcome = service.handle_search(&Query::new("dental")).await;
        check!(!outcome.success);
        check!(outcome.results.is_empty());
        check!(outcome.summary.is_none());
        check!(outcome.error.as_deref() == Some("Search processing failed"));
    }

    #[tokio::test]
    async fn test_synthesis_failure_becomes_processing_error() {
        let config = Config::default().validated().unwrap();
        let service = SearchService::new(
            Arc::new(CorpusStore::builtin()),
            Ranker::new(
                Arc::new(LexicalScorer::new(config.rules.topics)),
                RankingPolicy::default(),
            ),
            Arc::new(FailingSynthesizer),
        );
        let result = service.search(&Query::new("dental")).await;
        check!(result == Err(SearchError::Processing));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let service = service()
            .with_response_delay(Duration::from_millis(500))
            .with_deadline(Some(Duration::from_millis(20)));
        let result = service.search(&Query::new("dental coverage")).await;
        check!(result == Err(SearchError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_cancelled_before_completion() {
        let service = service().with_response_delay(Duration::from_secs(5));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = service
            .search_with_cancel(&Query::new("dental coverage"), &cancel)
            .await;
        check!(result == Err(SearchError::Cancelled));
    }

    #[tokio::test]
    async fn test_response_delay_applied() {
        let service = service().with_response_delay(Duration::from_millis(50));
        let start = Instant::now();
        service.search(&Query::new("dental coverage")).await.unwrap();
        check!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_not_found_skips_response_delay() {
        let service = service().with_response_delay(Duration::from_secs(5));
        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            service.search(&Query::new("xyzzy plugh")),
        )
        .await
        .expect("not-found outcome should not wait for the response delay")
        .unwrap();
        check!(outcome.success);
        check!(outcome.results.is_empty());
    }
}
