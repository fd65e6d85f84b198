//! Query normalization and tokenization for relevance scoring.

/// Tokens of this many characters or fewer are discarded.
const MAX_DISCARDED_TOKEN_LENGTH: usize = 2;

/// A lowercased query split into its significant tokens.
///
/// Built once per search and reused for every excerpt, so the per-excerpt cost
/// is only substring tests against the lowercased excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerms {
    /// The full query, lowercased
    text: String,
    /// Whitespace-separated tokens longer than two characters, in query order
    tokens: Vec<String>,
}

impl QueryTerms {
    pub fn new(query: &str) -> Self {
        let text = query.to_lowercase();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The surviving tokens re-joined with single spaces.
    ///
    /// Only meaningful as a phrase when there is more than one token.
    pub fn phrase(&self) -> Option<String> {
        (self.tokens.len() > 1).then(|| self.tokens.join(" "))
    }
}

/// Split already-lowercased text on whitespace, dropping short tokens.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > MAX_DISCARDED_TOKEN_LENGTH)
        .map(str::to_owned)
        .collect()
}
