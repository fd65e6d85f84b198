pub mod answer;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod format;
pub mod http;
pub mod metadata;
pub mod rules;
pub mod search;
pub mod server;
pub mod service;
pub mod tracing;
pub mod types;

pub use answer::{AnswerSynthesizer, TemplateSynthesizer};
pub use config::Config;
pub use corpus::{CorpusStore, Document};
pub use error::{Result, SearchError};
pub use search::{LexicalScorer, Ranker, RankingPolicy, RelevanceScorer, ResultMode};
pub use service::SearchService;
pub use types::{Query, ScoredExcerpt, SearchOutcome};
