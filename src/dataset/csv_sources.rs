//! Adapters for the tabular (CSV) dataset sources.
//!
//! The raw files disagree on column naming (`text`/`label` vs. the Kaggle
//! export's `v2`/`v1`), so each adapter resolves its columns by name from a
//! candidate list instead of guessing dataset shape at runtime.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::warn;

use super::{DatasetSource, Document, Label};
use crate::error::{AffError, Result};

/// Keywords that separate advance-fee spam from garden-variety spam.
const AFF_KEYWORDS: &[&str] = &[
    "won", "prize", "cash", "claim", "urgent", "award", "contact", "call", "money",
];

/// Find the first candidate column present in the header row.
fn column_index(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
}

fn open_reader(path: &Path) -> Result<Option<csv::Reader<std::fs::File>>> {
    if !path.exists() {
        warn!(path = %path.display(), "dataset file not found, skipping");
        return Ok(None);
    }
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    Ok(Some(reader))
}

/// Legitimate email corpus. Rows labeled `ham` (or all rows when the file
/// carries no label column) become [`Label::Legitimate`] documents.
#[derive(Clone, Debug)]
pub struct HamCsvSource {
    path: PathBuf,
}

impl HamCsvSource {
    /// Create an adapter for the given CSV file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        HamCsvSource { path: path.into() }
    }
}

impl DatasetSource for HamCsvSource {
    fn load(&self) -> Result<Vec<Document>> {
        let Some(mut reader) = open_reader(&self.path)? else {
            return Ok(Vec::new());
        };

        let headers = reader.headers()?.clone();
        let text_col = column_index(&headers, &["text", "v2"])
            .ok_or_else(|| AffError::dataset("ham CSV has no text or v2 column"))?;
        let label_col = column_index(&headers, &["label", "v1"]);

        let mut documents = Vec::new();
        for record in reader.records() {
            let record = record?;
            let keep = match label_col {
                Some(col) => record.get(col) == Some("ham"),
                None => true,
            };
            if keep && let Some(text) = record.get(text_col) {
                documents.push(Document {
                    text: text.to_string(),
                    label: Label::Legitimate,
                });
            }
        }

        Ok(documents)
    }

    fn name(&self) -> &str {
        "legitimate-emails"
    }
}

/// SMS spam corpus. Spam rows whose text matches an advance-fee keyword
/// become [`Label::Fraud`] documents; other spam is discarded.
#[derive(Clone, Debug)]
pub struct SmsCsvSource {
    path: PathBuf,
}

impl SmsCsvSource {
    /// Create an adapter for the given CSV file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SmsCsvSource { path: path.into() }
    }
}

impl DatasetSource for SmsCsvSource {
    fn load(&self) -> Result<Vec<Document>> {
        let Some(mut reader) = open_reader(&self.path)? else {
            return Ok(Vec::new());
        };

        let headers = reader.headers()?.clone();
        let text_col = column_index(&headers, &["v2", "text"])
            .ok_or_else(|| AffError::dataset("SMS CSV has no v2 or text column"))?;
        let label_col = column_index(&headers, &["v1", "label"])
            .ok_or_else(|| AffError::dataset("SMS CSV has no v1 or label column"))?;

        let mut documents = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.get(label_col) != Some("spam") {
                continue;
            }
            let Some(text) = record.get(text_col) else {
                continue;
            };
            let lowered = text.to_lowercase();
            if AFF_KEYWORDS.iter().any(|k| lowered.contains(k)) {
                documents.push(Document {
                    text: text.to_string(),
                    label: Label::Fraud,
                });
            }
        }

        Ok(documents)
    }

    fn name(&self) -> &str {
        "sms-aff"
    }
}

/// Fake job posting corpus. Rows flagged `fraudulent` become
/// [`Label::Fraud`] documents with text = title + description.
#[derive(Clone, Debug)]
pub struct JobCsvSource {
    path: PathBuf,
}

impl JobCsvSource {
    /// Create an adapter for the given CSV file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JobCsvSource { path: path.into() }
    }
}

impl DatasetSource for JobCsvSource {
    fn load(&self) -> Result<Vec<Document>> {
        let Some(mut reader) = open_reader(&self.path)? else {
            return Ok(Vec::new());
        };

        let headers = reader.headers()?.clone();
        let title_col = column_index(&headers, &["title"])
            .ok_or_else(|| AffError::dataset("job CSV has no title column"))?;
        let description_col = column_index(&headers, &["description"])
            .ok_or_else(|| AffError::dataset("job CSV has no description column"))?;
        let fraud_col = column_index(&headers, &["fraudulent"])
            .ok_or_else(|| AffError::dataset("job CSV has no fraudulent column"))?;

        let mut documents = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.get(fraud_col) != Some("1") {
                continue;
            }
            let title = record.get(title_col).unwrap_or_default();
            let description = record.get(description_col).unwrap_or_default();
            documents.push(Document {
                text: format!("{title} {description}"),
                label: Label::Fraud,
            });
        }

        Ok(documents)
    }

    fn name(&self) -> &str {
        "employment-aff"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_ham_csv_keeps_ham_rows() {
        let file = write_csv("label,text\nham,see you at the meeting\nspam,win a prize now\n");
        let documents = HamCsvSource::new(file.path()).load().unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "see you at the meeting");
        assert_eq!(documents[0].label, Label::Legitimate);
    }

    #[test]
    fn test_ham_csv_kaggle_columns() {
        let file = write_csv("v1,v2\nham,lunch tomorrow?\nspam,claim your cash\n");
        let documents = HamCsvSource::new(file.path()).load().unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "lunch tomorrow?");
    }

    #[test]
    fn test_ham_csv_without_label_column_keeps_all() {
        let file = write_csv("text\nhello there\nanother message\n");
        let documents = HamCsvSource::new(file.path()).load().unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn test_sms_csv_filters_to_aff_keywords() {
        let file = write_csv(
            "v1,v2\n\
             spam,You have WON a cash prize\n\
             spam,cheap watches for sale\n\
             ham,are we still on for dinner\n",
        );
        let documents = SmsCsvSource::new(file.path()).load().unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "You have WON a cash prize");
        assert_eq!(documents[0].label, Label::Fraud);
    }

    #[test]
    fn test_job_csv_keeps_fraudulent_rows() {
        let file = write_csv(
            "title,description,fraudulent\n\
             Data Entry,earn money from home urgent,1\n\
             Engineer,build software,0\n",
        );
        let documents = JobCsvSource::new(file.path()).load().unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "Data Entry earn money from home urgent");
        assert_eq!(documents[0].label, Label::Fraud);
    }

    #[test]
    fn test_missing_files_contribute_nothing() {
        assert!(
            HamCsvSource::new("/nonexistent.csv")
                .load()
                .unwrap()
                .is_empty()
        );
        assert!(
            SmsCsvSource::new("/nonexistent.csv")
                .load()
                .unwrap()
                .is_empty()
        );
        assert!(
            JobCsvSource::new("/nonexistent.csv")
                .load()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let file = write_csv("foo,bar\n1,2\n");
        assert!(HamCsvSource::new(file.path()).load().is_err());
    }
}
