//! Turning the top-ranked excerpt into a one-sentence answer.

use crate::error::Result;
use crate::rules::{EXCERPT_PLACEHOLDER, FILENAME_PLACEHOLDER, IntentCategory, RuleSet};
use crate::types::ScoredExcerpt;

/// Produces the answer shown alongside search results.
///
/// Implementations receive the raw query and the grounding excerpt and must
/// return a single string grounded in that excerpt. A model-backed
/// implementation can be swapped in without touching ranking or the service.
pub trait AnswerSynthesizer: Send + Sync {
    fn synthesize(&self, query: &str, top: Option<&ScoredExcerpt>) -> Result<String>;
}

/// Fills an intent-specific template with the excerpt and its filename.
#[derive(Debug, Clone)]
pub struct TemplateSynthesizer {
    intents: Vec<IntentCategory>,
    fallback_template: String,
    not_found_message: String,
}

impl TemplateSynthesizer {
    /// Rules must already be validated (lowercase keywords).
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            intents: rules.intents.clone(),
            fallback_template: rules.fallback_template.clone(),
            not_found_message: rules.not_found_message.clone(),
        }
    }

    /// The first intent, in table order, with a keyword in the query.
    pub fn classify(&self, query: &str) -> Option<&IntentCategory> {
        let query = query.to_lowercase();
        self.intents.iter().find(|intent| {
            intent
                .keywords
                .iter()
                .any(|keyword| query.contains(keyword.as_str()))
        })
    }

    pub fn not_found_message(&self) -> &str {
        &self.not_found_message
    }
}

impl AnswerSynthesizer for TemplateSynthesizer {
    fn synthesize(&self, query: &str, top: Option<&ScoredExcerpt>) -> Result<String> {
        let Some(top) = top else {
            return Ok(self.not_found_message.clone());
        };

        let (category, template) = match self.classify(query) {
            Some(intent) => (intent.name.as_str(), intent.template.as_str()),
            None => ("fallback", self.fallback_template.as_str()),
        };
        tracing::debug!(category, document = %top.document_id, "Synthesizing answer");

        Ok(render(template, &top.filename, &top.excerpt))
    }
}

/// Substitute placeholders in one pass so neither value is re-expanded.
fn render(template: &str, filename: &str, excerpt: &str) -> String {
    template
        .split(EXCERPT_PLACEHOLDER)
        .map(|part| part.replace(FILENAME_PLACEHOLDER, filename))
        .collect::<Vec<_>>()
        .join(excerpt)
}
