//! Read/write the processed (cleaned, labeled) corpus CSV.
//!
//! The ingest command writes this file once; training reads it back instead
//! of re-parsing the raw sources.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CleanDocument, Label};
use crate::error::{AffError, Result};

/// On-disk row shape for the processed corpus.
#[derive(Debug, Serialize, Deserialize)]
struct ProcessedRow {
    text: String,
    label: u8,
    clean_text: String,
}

/// Write the cleaned corpus to a CSV file, creating parent directories.
pub fn write_processed(path: &Path, documents: &[CleanDocument]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for doc in documents {
        writer.serialize(ProcessedRow {
            text: doc.text.clone(),
            label: doc.label.as_usize() as u8,
            clean_text: doc.clean_text.clone(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a cleaned corpus back from a CSV file.
pub fn read_processed(path: &Path) -> Result<Vec<CleanDocument>> {
    if !path.exists() {
        return Err(AffError::dataset(format!(
            "processed corpus not found at {}; run ingest first",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut documents = Vec::new();
    for row in reader.deserialize() {
        let row: ProcessedRow = row?;
        documents.push(CleanDocument {
            text: row.text,
            clean_text: row.clean_text,
            label: Label::from_usize(row.label as usize),
        });
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("clean_dataset.csv");

        let documents = vec![
            CleanDocument {
                text: "Send $500 NOW!".to_string(),
                clean_text: "send $500 now".to_string(),
                label: Label::Fraud,
            },
            CleanDocument {
                text: "Meeting at 10.".to_string(),
                clean_text: "meeting at 10".to_string(),
                label: Label::Legitimate,
            },
        ];

        write_processed(&path, &documents).unwrap();
        let restored = read_processed(&path).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].clean_text, "send $500 now");
        assert_eq!(restored[0].label, Label::Fraud);
        assert_eq!(restored[1].label, Label::Legitimate);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let err = read_processed(Path::new("/nonexistent/clean.csv")).unwrap_err();
        assert!(matches!(err, AffError::Dataset(_)));
    }
}
