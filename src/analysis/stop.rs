//! English stop-word list used by the vectorizer.
//!
//! Stop words are common function words ("the", "is", "at") that carry no
//! fraud signal and would otherwise dominate the top of the vocabulary by
//! frequency. The default list covers English articles, pronouns,
//! prepositions, conjunctions, and auxiliary verbs.
//!
//! # Examples
//!
//! ```
//! use scamshield::analysis::stop::StopWords;
//!
//! let stop = StopWords::new();
//! assert!(stop.contains("the"));
//! assert!(!stop.contains("banker"));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// Default English stop words.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A set of words excluded from the vocabulary during fitting.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: Arc<HashSet<String>>,
}

impl StopWords {
    /// Create a stop-word set with the default English list.
    pub fn new() -> Self {
        StopWords {
            words: Arc::new(DEFAULT_ENGLISH_STOP_WORDS_SET.clone()),
        }
    }

    /// Create an empty stop-word set (no filtering).
    pub fn none() -> Self {
        StopWords {
            words: Arc::new(HashSet::new()),
        }
    }

    /// Create a stop-word set from a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWords {
            words: Arc::new(words.into_iter().map(|s| s.into()).collect()),
        }
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop-word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stop_words() {
        let stop = StopWords::new();
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        assert!(stop.contains("your"));
        assert!(!stop.contains("urgent"));
        assert!(!stop.contains("transfer"));
    }

    #[test]
    fn test_custom_words() {
        let stop = StopWords::from_words(vec!["foo", "bar"]);
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("foo"));
        assert!(!stop.contains("the"));
    }

    #[test]
    fn test_none_filters_nothing() {
        let stop = StopWords::none();
        assert!(stop.is_empty());
        assert!(!stop.contains("the"));
    }
}
