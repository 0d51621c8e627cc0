//! Text normalization for raw email/SMS/job-posting bodies.
//!
//! The normalizer is the first stage of the pipeline: it maps arbitrary raw
//! text to a lowercase string containing only ASCII letters, digits, dollar
//! signs, and single spaces. Email header lines (`From:`, `Subject:`, ...)
//! are stripped because they carry routing noise rather than scam signal.
//!
//! # Examples
//!
//! ```
//! use scamshield::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! let cleaned = normalizer.normalize("Subject: URGENT!!\nSend $500 NOW!");
//! assert_eq!(cleaned, "send $500 now");
//! ```

use regex::Regex;

use crate::error::{AffError, Result};

/// Header-style line prefixes whose rest-of-line content is stripped.
const HEADER_PATTERN: &str = r"\b(from|to|subject|date|received):.*";

/// Everything outside this set is replaced with a space. The dollar sign is
/// kept on purpose: monetary amounts are a strong fraud signal.
const SCRUB_PATTERN: &str = r"[^a-z0-9\s$]";

/// Deterministic raw-text to clean-text mapping.
///
/// Applying the normalizer twice yields the same output as applying it once,
/// and the output alphabet is `[a-z0-9$ ]` with no leading, trailing, or
/// repeated spaces.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    header: Regex,
    scrub: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Create a new normalizer with the default cleaning rules.
    pub fn new() -> Result<Self> {
        Ok(TextNormalizer {
            header: Regex::new(HEADER_PATTERN)
                .map_err(|e| AffError::analysis(format!("Invalid header pattern: {e}")))?,
            scrub: Regex::new(SCRUB_PATTERN)
                .map_err(|e| AffError::analysis(format!("Invalid scrub pattern: {e}")))?,
            whitespace: Regex::new(r"\s+")
                .map_err(|e| AffError::analysis(format!("Invalid whitespace pattern: {e}")))?,
        })
    }

    /// Normalize raw text into a cleaned token string.
    ///
    /// Empty or whitespace-only input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_headers = self.header.replace_all(&lowered, "");
        let scrubbed = self.scrub.replace_all(&without_headers, " ");
        self.whitespace.replace_all(&scrubbed, " ").trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new().expect("Default normalizer patterns should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_scrub() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(
            normalizer.normalize("Hello, WORLD! Send $15 million."),
            "hello world send $15 million"
        );
    }

    #[test]
    fn test_header_lines_stripped() {
        let normalizer = TextNormalizer::new().unwrap();
        let text = "From: scammer@example.com\nSubject: your prize\nclaim your award now";
        assert_eq!(normalizer.normalize(text), "claim your award now");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t  "), "");
        assert_eq!(normalizer.normalize("!!!???"), "");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::new().unwrap();
        let once = normalizer.normalize("Dear Friend,\nI am a BANKER. $15,000,000 awaits!");
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_alphabet() {
        let normalizer = TextNormalizer::new().unwrap();
        let cleaned = normalizer.normalize("Wiñ £500 — cäll +44-7911 NOW!!! $$$");
        assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '$' || c == ' ')
        );
        assert!(!cleaned.contains("  "));
    }
}
