//! Keyword tables driving the scorer and the answer templates.
//!
//! Both tables are plain data so deployments can add or reorder categories from
//! the config file without touching control flow.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the source document's filename.
pub const FILENAME_PLACEHOLDER: &str = "{filename}";
/// Placeholder replaced with the matched excerpt text.
pub const EXCERPT_PLACEHOLDER: &str = "{excerpt}";

const DEFAULT_NOT_FOUND: &str = "I couldn't find any relevant information in your uploaded documents for this query. Please try rephrasing your question or upload more relevant documents.";
const DEFAULT_FALLBACK_TEMPLATE: &str = "Based on the information found in {filename}: {excerpt} Please refer to the complete document for additional details.";

/// A set of related keywords treated as one semantic topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

/// A query intent with the template used to phrase its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCategory {
    pub name: String,
    pub keywords: Vec<String>,
    pub template: String,
}

/// Topic groups for scoring and ordered intent categories for synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub topics: Vec<TopicGroup>,
    /// Checked in order; the first category with a matching keyword wins.
    pub intents: Vec<IntentCategory>,
    pub fallback_template: String,
    pub not_found_message: String,
}

impl RuleSet {
    /// Check templates and keywords, and lowercase every keyword.
    ///
    /// Matching is case-insensitive, so keywords are normalized once here
    /// rather than on every comparison.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        for topic in &mut self.topics {
            normalize_keywords(&topic.name, &mut topic.keywords)?;
        }

        for intent in &mut self.intents {
            normalize_keywords(&intent.name, &mut intent.keywords)?;
            if !intent.template.contains(EXCERPT_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "template for intent '{}' must contain {}",
                    intent.name, EXCERPT_PLACEHOLDER
                )));
            }
        }

        if !self.fallback_template.contains(EXCERPT_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "fallback template must contain {}",
                EXCERPT_PLACEHOLDER
            )));
        }
        if self.not_found_message.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "not-found message must not be empty".to_string(),
            ));
        }

        Ok(self)
    }
}

fn normalize_keywords(owner: &str, keywords: &mut [String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "category '{}' has no keywords",
            owner
        )));
    }
    for keyword in keywords.iter_mut() {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "category '{}' has an empty keyword",
                owner
            )));
        }
        *keyword = keyword.to_lowercase();
    }
    Ok(())
}

fn topic(name: &str, keywords: &[&str]) -> TopicGroup {
    TopicGroup {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

fn intent(name: &str, keywords: &[&str], template: &str) -> IntentCategory {
    IntentCategory {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        template: template.to_string(),
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            topics: vec![
                topic(
                    "dental",
                    &["dental", "teeth", "tooth", "dentist", "oral", "cavity", "filling"],
                ),
                topic(
                    "medical",
                    &["medical", "health", "insurance", "coverage", "treatment", "doctor", "hospital"],
                ),
                topic(
                    "payment",
                    &["payment", "pay", "cost", "fee", "price", "invoice", "billing", "charge"],
                ),
                topic(
                    "vacation",
                    &["vacation", "leave", "holiday", "time off", "pto", "absence"],
                ),
                topic(
                    "termination",
                    &["termination", "terminate", "end", "cancel", "quit", "fire", "dismiss"],
                ),
                topic(
                    "privacy",
                    &["privacy", "data", "confidential", "gdpr", "personal", "information"],
                ),
                topic(
                    "benefits",
                    &["benefits", "insurance", "coverage", "bonus", "compensation"],
                ),
            ],
            intents: vec![
                intent(
                    "dental",
                    &["dental", "teeth"],
                    "According to the {filename}, {excerpt} This covers your dental care needs comprehensively.",
                ),
                intent(
                    "vacation",
                    &["vacation", "time off", "pto"],
                    "Based on the policy outlined in {filename}: {excerpt} This policy applies to all eligible employees.",
                ),
                intent(
                    "compensation",
                    &["salary", "pay", "compensation"],
                    "Regarding compensation as specified in {filename}: {excerpt} This represents the current compensation structure.",
                ),
                intent(
                    "remote-work",
                    &["remote", "work from home", "wfh"],
                    "The remote work policy in {filename} states: {excerpt} Please coordinate with your manager for implementation.",
                ),
                intent(
                    "payment",
                    &["payment", "invoice", "billing"],
                    "Payment terms according to {filename}: {excerpt} These terms are standard for all transactions.",
                ),
                intent(
                    "termination",
                    &["terminate", "end", "quit"],
                    "Termination procedures per {filename}: {excerpt} Please ensure all requirements are met.",
                ),
                intent(
                    "privacy",
                    &["privacy", "data", "personal information"],
                    "Privacy policy as detailed in {filename}: {excerpt} This ensures compliance with data protection regulations.",
                ),
                intent(
                    "insurance",
                    &["insurance", "medical", "health"],
                    "Health insurance coverage per {filename}: {excerpt} Contact HR for enrollment details.",
                ),
                intent(
                    "retirement",
                    &["401k", "retirement", "pension"],
                    "Retirement benefits outlined in {filename}: {excerpt} Speak with a financial advisor for optimization strategies.",
                ),
            ],
            fallback_template: DEFAULT_FALLBACK_TEMPLATE.to_string(),
            not_found_message: DEFAULT_NOT_FOUND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_default_rules_validate() {
        let rules = RuleSet::default().validated().unwrap();
        check!(rules.topics.len() == 7);
        check!(rules.intents.len() == 9);
        check!(rules.intents[0].name == "dental");
    }

    #[test]
    fn test_keywords_lowercased() {
        let mut rules = RuleSet::default();
        rules.topics[0].keywords.push("Molar".to_string());
        let rules = rules.validated().unwrap();
        check!(rules.topics[0].keywords.contains(&"molar".to_string()));
    }

    #[test]
    fn test_template_without_excerpt_rejected() {
        let mut rules = RuleSet::default();
        rules.intents[2].template = "Ask {filename} yourself.".to_string();
        let err = rules.validated().unwrap_err();
        check!(err.to_string().contains("compensation"));
    }

    #[test]
    fn test_empty_keyword_list_rejected() {
        let mut rules = RuleSet::default();
        rules.topics[1].keywords.clear();
        check!(rules.validated().is_err());
    }

    #[test]
    fn test_fallback_without_excerpt_rejected() {
        let rules = RuleSet {
            fallback_template: "Nothing grounded here".to_string(),
            ..RuleSet::default()
        };
        check!(rules.validated().is_err());
    }
}
