//! Dataset ingestion: raw heterogeneous sources to labeled documents.
//!
//! Each raw input format is wrapped in a [`DatasetSource`] adapter that
//! returns a normalized `(text, label)` stream, so the rest of the pipeline
//! never sees per-source column quirks. A missing input file is logged and
//! contributes zero documents; ingestion continues with the other sources.

pub mod csv_sources;
pub mod mailbox;
pub mod processed;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::TextNormalizer;
use crate::error::Result;

pub use csv_sources::{HamCsvSource, JobCsvSource, SmsCsvSource};
pub use mailbox::MailboxSource;

/// Binary document label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Advance-fee fraud (wire value `"FRAUD"`, numeric 1).
    Fraud,
    /// Legitimate message (wire value `"LEGITIMATE"`, numeric 0).
    Legitimate,
}

impl Label {
    /// Numeric form used by the classifier (fraud = 1).
    pub fn as_usize(self) -> usize {
        match self {
            Label::Fraud => 1,
            Label::Legitimate => 0,
        }
    }

    /// Convert from the classifier's numeric form.
    pub fn from_usize(value: usize) -> Self {
        if value == 1 {
            Label::Fraud
        } else {
            Label::Legitimate
        }
    }

    /// Wire string used by the CLI and the HTTP API.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Fraud => "FRAUD",
            Label::Legitimate => "LEGITIMATE",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw ingested document. Immutable once ingested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub label: Label,
}

/// A document after normalization, ready for vectorization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CleanDocument {
    pub text: String,
    pub clean_text: String,
    pub label: Label,
}

/// A raw dataset format adapter.
///
/// Implementations own the parsing quirks of one source format and produce
/// labeled documents. `load` returns an empty vector (after logging a
/// warning) when the backing file is missing.
pub trait DatasetSource: Send + Sync {
    /// Load all documents from this source.
    fn load(&self) -> Result<Vec<Document>>;

    /// Short name used in ingestion logs.
    fn name(&self) -> &str;
}

/// Load and concatenate every source, skipping none on per-source emptiness.
pub fn load_corpus(sources: &[Box<dyn DatasetSource>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for source in sources {
        let batch = source.load()?;
        if batch.is_empty() {
            warn!(source = source.name(), "source contributed no documents");
        } else {
            info!(
                source = source.name(),
                documents = batch.len(),
                "loaded source"
            );
        }
        documents.extend(batch);
    }

    Ok(documents)
}

/// Normalize raw documents and drop those whose cleaned text is too short
/// to carry signal.
pub fn normalize_documents(
    documents: Vec<Document>,
    normalizer: &TextNormalizer,
    min_clean_len: usize,
) -> Vec<CleanDocument> {
    documents
        .into_iter()
        .filter_map(|doc| {
            let clean_text = normalizer.normalize(&doc.text);
            if clean_text.len() > min_clean_len {
                Some(CleanDocument {
                    text: doc.text,
                    clean_text,
                    label: doc.label,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        assert_eq!(Label::Fraud.as_usize(), 1);
        assert_eq!(Label::Legitimate.as_usize(), 0);
        assert_eq!(Label::from_usize(1), Label::Fraud);
        assert_eq!(Label::from_usize(0), Label::Legitimate);
        assert_eq!(Label::Fraud.to_string(), "FRAUD");
        assert_eq!(Label::Legitimate.to_string(), "LEGITIMATE");
    }

    #[test]
    fn test_normalize_documents_drops_short_texts() {
        let normalizer = TextNormalizer::new().unwrap();
        let documents = vec![
            Document {
                text: "Dear friend, transfer $15 million urgently".to_string(),
                label: Label::Fraud,
            },
            Document {
                text: "ok!!".to_string(),
                label: Label::Legitimate,
            },
        ];

        let cleaned = normalize_documents(documents, &normalizer, 10);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].label, Label::Fraud);
        assert_eq!(
            cleaned[0].clean_text,
            "dear friend transfer $15 million urgently"
        );
    }
}
