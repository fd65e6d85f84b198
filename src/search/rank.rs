//! Scoring every candidate excerpt and keeping the best ones.

use super::scoring::RelevanceScorer;
use super::tokenize::QueryTerms;
use crate::corpus::Document;
use crate::types::ScoredExcerpt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default minimum relevance; an excerpt must score strictly above it.
pub const DEFAULT_MIN_RELEVANCE: f32 = 0.3;

/// Default number of results in top-k mode.
pub const DEFAULT_TOP_K: usize = 10;

/// How many ranked excerpts a search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultMode {
    /// Only the single best excerpt, used as "the answer".
    #[default]
    BestOnly,
    /// Up to `top_k` excerpts, for a result list.
    TopK,
}

/// Threshold and cardinality applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPolicy {
    pub min_relevance: f32,
    pub mode: ResultMode,
    pub top_k: usize,
}

impl RankingPolicy {
    /// Maximum number of results this policy keeps.
    pub const fn limit(&self) -> usize {
        match self.mode {
            ResultMode::BestOnly => 1,
            ResultMode::TopK => self.top_k,
        }
    }
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_relevance: DEFAULT_MIN_RELEVANCE,
            mode: ResultMode::BestOnly,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Ranks candidate excerpts with a pluggable scorer.
#[derive(Clone)]
pub struct Ranker {
    scorer: Arc<dyn RelevanceScorer>,
    policy: RankingPolicy,
}

impl std::fmt::Debug for Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Ranker {
    pub fn new(scorer: Arc<dyn RelevanceScorer>, policy: RankingPolicy) -> Self {
        Self { scorer, policy }
    }

    pub const fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Score all excerpts of `candidates`, drop those at or below the
    /// threshold, and return the survivors best first.
    ///
    /// The sort is stable, so equal scores keep corpus order (document order,
    /// then page order).
    pub fn rank(&self, query: &QueryTerms, candidates: &[&Document]) -> Vec<ScoredExcerpt> {
        let mut scored: Vec<ScoredExcerpt> = candidates
            .iter()
            .flat_map(|doc| {
                doc.pages().filter_map(move |(page_number, excerpt)| {
                    let relevance_score = self.scorer.score(query, excerpt);
                    (relevance_score > self.policy.min_relevance).then(|| ScoredExcerpt {
                        document_id: doc.id.clone(),
                        filename: doc.filename.clone(),
                        excerpt: excerpt.to_string(),
                        relevance_score,
                        page_number,
                    })
                })
            })
            .collect();

        let matched = scored.len();
        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        scored.truncate(self.policy.limit());

        tracing::debug!(
            candidates = candidates.len(),
            matched,
            returned = scored.len(),
            "Ranked excerpts"
        );

        scored
    }
}
