//! Search relevance scoring.
//!
//! [`LexicalScorer`] is a keyword heuristic standing in for semantic
//! similarity. Anything implementing [`RelevanceScorer`] can replace it, e.g. an
//! embedding cosine similarity, as long as it keeps the `[0, 1]` range.

use super::tokenize::QueryTerms;
use crate::rules::TopicGroup;

/// Added for each query token found in the excerpt.
const TOKEN_MATCH_WEIGHT: f32 = 0.3;
/// Added for each topic group present in both query and excerpt.
const TOPIC_MATCH_WEIGHT: f32 = 0.5;
/// Added when the excerpt contains the whole query verbatim.
const EXACT_QUERY_WEIGHT: f32 = 0.8;
/// Added when the excerpt contains the multi-token phrase.
const PHRASE_MATCH_WEIGHT: f32 = 0.6;
/// Upper bound of every score.
pub const MAX_SCORE: f32 = 1.0;

/// Relevance of one excerpt to a query, in `[0, 1]`.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, query: &QueryTerms, excerpt: &str) -> f32;
}

/// Case-insensitive keyword, topic and phrase matching.
///
/// Scoring:
/// - +0.3 per query token (longer than two characters) contained in the excerpt
/// - +0.5 per topic group with a keyword in the query and a keyword in the excerpt
/// - +0.8 if the excerpt contains the whole query
/// - +0.6 if the query has several tokens and the excerpt contains them as a phrase
/// - clamped to 1.0
#[derive(Debug, Clone)]
pub struct LexicalScorer {
    topics: Vec<TopicGroup>,
}

impl LexicalScorer {
    /// Keywords must already be lowercase (see [`crate::rules::RuleSet::validated`]).
    pub fn new(topics: Vec<TopicGroup>) -> Self {
        Self { topics }
    }

    /// Score raw strings, tokenizing the query on the spot.
    pub fn score_text(&self, query: &str, excerpt: &str) -> f32 {
        self.score(&QueryTerms::new(query), excerpt)
    }

    fn topic_overlap(&self, query: &str, excerpt: &str) -> usize {
        self.topics
            .iter()
            .filter(|topic| {
                mentions_any(query, &topic.keywords) && mentions_any(excerpt, &topic.keywords)
            })
            .count()
    }
}

impl RelevanceScorer for LexicalScorer {
    fn score(&self, query: &QueryTerms, excerpt: &str) -> f32 {
        let excerpt = excerpt.to_lowercase();
        let mut score = 0.0;

        let token_hits = query
            .tokens()
            .iter()
            .filter(|token| excerpt.contains(token.as_str()))
            .count();
        score += token_hits as f32 * TOKEN_MATCH_WEIGHT;

        score += self.topic_overlap(query.text(), &excerpt) as f32 * TOPIC_MATCH_WEIGHT;

        if excerpt.contains(query.text()) {
            score += EXACT_QUERY_WEIGHT;
        }

        if let Some(phrase) = query.phrase()
            && excerpt.contains(&phrase)
        {
            score += PHRASE_MATCH_WEIGHT;
        }

        score.min(MAX_SCORE)
    }
}

fn mentions_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
