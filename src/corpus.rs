//! Read-only document corpus searched by the engine.
//!
//! The corpus is built once at startup, either from the built-in dataset or
//! from a JSON file, and shared behind an `Arc` for the lifetime of the process.
//! Uploads go to [`crate::metadata`] and never touch it.

use crate::error::CorpusError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document pre-split into ordered excerpts.
///
/// Excerpt `i` is reported as page `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub excerpts: Vec<String>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        excerpts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            excerpts: excerpts.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterate excerpts paired with their 1-based page numbers.
    pub fn pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.excerpts
            .iter()
            .zip(1u32..)
            .map(|(excerpt, page)| (page, excerpt.as_str()))
    }
}

/// Immutable set of searchable documents, in load order.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    documents: Vec<Document>,
}

impl CorpusStore {
    /// Build a store, rejecting duplicate document ids.
    pub fn new(documents: Vec<Document>) -> Result<Self, CorpusError> {
        let mut seen = AHashSet::with_capacity(documents.len());
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(CorpusError::DuplicateId(doc.id.clone()));
            }
        }
        Ok(Self { documents })
    }

    /// Load documents from a JSON array of `{id, filename, excerpts}` objects.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let documents: Vec<Document> =
            serde_json::from_str(&raw).map_err(|source| CorpusError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::new(documents)?;
        tracing::info!(
            path = %path.display(),
            documents = store.len(),
            "Loaded corpus from file"
        );
        Ok(store)
    }

    /// The built-in demo dataset.
    pub fn builtin() -> Self {
        Self {
            documents: builtin_documents(),
        }
    }

    /// Documents to search, in corpus order.
    ///
    /// `None` or an empty set selects every document; otherwise only documents
    /// whose id is in the set. Unknown ids are ignored.
    pub fn get_documents(&self, ids: Option<&AHashSet<String>>) -> Vec<&Document> {
        match ids {
            Some(ids) if !ids.is_empty() => self
                .documents
                .iter()
                .filter(|doc| ids.contains(&doc.id))
                .collect(),
            _ => self.documents.iter().collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of excerpts across all documents.
    pub fn excerpt_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.excerpts.len()).sum()
    }
}

impl Default for CorpusStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_documents() -> Vec<Document> {
    vec![
        Document::new(
            "1",
            "Employment_Contract_2024.pdf",
            [
                "The employee shall be entitled to 25 days of annual vacation leave, health insurance coverage including dental and vision, and performance-based bonuses as outlined in Section 4.2 of this agreement.",
                "Termination of employment may occur with 30 days written notice from either party. Severance pay will be calculated based on years of service at 2 weeks per year worked.",
                "Confidentiality obligations continue for 2 years post-employment. Trade secrets and proprietary information must not be disclosed to competitors.",
                "Medical insurance covers 100% of preventive care, 80% of specialist visits, and 70% of hospital stays. Dental coverage includes cleanings, fillings, and major procedures.",
                "Annual salary is $85,000 with quarterly performance reviews. Cost of living adjustments are made annually based on market rates.",
                "Remote work is permitted up to 3 days per week with manager approval. Office attendance required on Mondays and Fridays.",
            ],
        ),
        Document::new(
            "2",
            "Privacy_Policy_v3.docx",
            [
                "Personal data collected includes name, email address, phone number, and usage analytics. Data is processed in accordance with GDPR regulations and stored securely using AES-256 encryption.",
                "Users have the right to access, modify, or delete their personal information within 30 days of request. Data retention period is 7 years for compliance purposes.",
                "Third-party integrations are limited to essential services only. No personal data is sold or shared for marketing purposes without explicit consent.",
                "Cookies are used for authentication and user preferences. Analytics cookies can be disabled in browser settings without affecting functionality.",
                "Data breaches will be reported to authorities within 72 hours and users notified within 5 business days of discovery.",
            ],
        ),
        Document::new(
            "3",
            "Vendor_Agreement_TechCorp.pdf",
            [
                "Payment terms are Net 30 days from invoice date. Late payments will incur a 1.5% monthly service charge. All payments must be made in USD via wire transfer or ACH.",
                "Service level agreement guarantees 99.9% uptime during business hours (9 AM - 6 PM EST). Downtime compensation is prorated at $500 per hour of interruption.",
                "Either party may terminate this agreement with 90 days written notice. Outstanding payments must be settled within 15 days of termination.",
                "Software licensing fees are $2,500 per month for up to 100 users. Additional users charged at $25 per user per month.",
                "Technical support is available 24/7 via phone and email. Priority support response time is 4 hours for critical issues.",
            ],
        ),
        Document::new(
            "4",
            "Partnership_Agreement_2024.pdf",
            [
                "Revenue sharing is split 60/40 between partners based on contribution levels. Quarterly reviews will assess performance metrics and adjust if needed.",
                "Intellectual property developed jointly belongs to both parties equally. Individual IP contributions remain with the originating party.",
                "Dispute resolution follows arbitration procedures outlined in Section 12. Legal costs are shared equally between parties unless gross negligence is proven.",
                "Initial investment required is $50,000 from each partner. Additional capital calls require unanimous agreement.",
                "Partnership may be dissolved with 6 months notice. Asset distribution follows the 60/40 revenue sharing model.",
            ],
        ),
        Document::new(
            "5",
            "Benefits_Handbook_2024.pdf",
            [
                "Dental insurance covers 100% of preventive care including cleanings and X-rays. Basic procedures like fillings covered at 80%, major work at 50%.",
                "Vision coverage includes annual eye exams and $300 allowance for frames or contacts. Prescription lenses covered up to $150 per year.",
                "Flexible spending accounts allow pre-tax savings up to $3,050 for medical expenses and $5,000 for dependent care.",
                "401(k) matching is 100% of first 3% and 50% of next 2%. Vesting is immediate for employee contributions, 3 years for company match.",
                "Paid time off accrues at 15 days per year for first 3 years, 20 days for years 4-10, and 25 days after 10 years of service.",
            ],
        ),
    ]
}
