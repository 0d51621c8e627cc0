//! Regex-based word tokenizer.

use regex::Regex;

use crate::error::{AffError, Result};

/// A regex-based tokenizer that extracts word tokens.
///
/// The default pattern `r"\w+"` matches sequences of word characters, which
/// is the rule used both when building the vocabulary and when vectorizing
/// text at inference time.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    /// Create a new tokenizer with the default `\w+` pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a new tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| AffError::analysis(format!("Invalid token pattern: {e}")))?;

        Ok(WordTokenizer { pattern: regex })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Split text into word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|mat| mat.as_str().to_string())
            .collect()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new().expect("Default token pattern should be valid")
    }
}
