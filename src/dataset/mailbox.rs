//! Adapter for the classic 419 email corpus: one large text blob with
//! messages separated by mbox-style `"From r"` markers.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use super::{DatasetSource, Document, Label};
use crate::error::Result;

/// Record separator in the raw fraud email dump.
const RECORD_MARKER: &str = "From r";

/// Fragments shorter than this are splitting debris, not messages.
const MIN_RECORD_LEN: usize = 50;

/// Fraud email mailbox dump, every record labeled [`Label::Fraud`].
#[derive(Clone, Debug)]
pub struct MailboxSource {
    path: PathBuf,
}

impl MailboxSource {
    /// Create an adapter for the given mailbox dump file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        MailboxSource { path: path.into() }
    }
}

impl DatasetSource for MailboxSource {
    fn load(&self) -> Result<Vec<Document>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "mailbox file not found, skipping");
            return Ok(Vec::new());
        }

        // The historical dump is Latin-1; lossy decoding keeps every record
        // usable since the normalizer discards non-ASCII anyway.
        let bytes = fs::read(&self.path)?;
        let data = String::from_utf8_lossy(&bytes);

        let documents = data
            .split(RECORD_MARKER)
            .filter(|record| record.len() > MIN_RECORD_LEN)
            .map(|record| Document {
                text: record.to_string(),
                label: Label::Fraud,
            })
            .collect();

        Ok(documents)
    }

    fn name(&self) -> &str {
        "classic-aff-mailbox"
    }
}
