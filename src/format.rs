//! Plain-text rendering of search outcomes and corpus listings for the MCP
//! tools and the CLI.

use crate::corpus::CorpusStore;
use crate::types::SearchOutcome;
use std::fmt::Write as _;

/// Render an outcome as readable text.
pub fn format_search_outcome(outcome: &SearchOutcome) -> String {
    if !outcome.success {
        return format!(
            "Search for '{}' failed: {}",
            outcome.query.trim(),
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    let mut output = String::new();
    if let Some(summary) = &outcome.summary {
        output.push_str(summary);
        output.push_str("\n\n");
    }

    if outcome.results.is_empty() {
        output.push_str("Search tips:\n");
        output.push_str("• Use key terms from the documents, e.g. 'dental coverage'\n");
        output.push_str("• Drop the document filter to search everything\n");
        return output;
    }

    let _ = writeln!(output, "Sources for '{}':\n", outcome.query.trim());
    for (idx, result) in outcome.results.iter().enumerate() {
        let relevance = (result.relevance_score * 100.0).round() as u8;
        let _ = writeln!(
            output,
            "{}. {} (document {}, page {}) - relevance: {}%",
            idx + 1,
            result.filename,
            result.document_id,
            result.page_number,
            relevance
        );
        let _ = writeln!(output, "   {}", result.excerpt);
    }

    output
}

/// Render the searchable documents with their ids, for use as search filters.
pub fn format_corpus(corpus: &CorpusStore) -> String {
    let mut output = format!(
        "Searchable documents ({}, {} excerpts):\n\n",
        corpus.len(),
        corpus.excerpt_count()
    );
    for doc in corpus.get_documents(None) {
        let _ = writeln!(
            output,
            "• [{}] {} - {} excerpts",
            doc.id,
            doc.filename,
            doc.excerpts.len()
        );
    }
    output
}
