//! Relevance search over the document corpus.
//!
//! This module provides query tokenization, excerpt scoring and ranking.

// Module declarations
pub(crate) mod rank;
pub(crate) mod scoring;
pub(crate) mod tokenize;

pub use rank::{DEFAULT_MIN_RELEVANCE, DEFAULT_TOP_K, Ranker, RankingPolicy, ResultMode};
pub use scoring::{LexicalScorer, MAX_SCORE, RelevanceScorer};
pub use tokenize::QueryTerms;
