//! Bag-of-words count vectorizer.
//!
//! [`CountVectorizer`] builds a bounded vocabulary from a training corpus and
//! maps any text to a count vector over that vocabulary. The vocabulary is
//! frozen after [`CountVectorizer::fit`]; `transform` never mutates it, and
//! calling `transform` before `fit` is a usage error.
//!
//! # Examples
//!
//! ```
//! use scamshield::feature::CountVectorizer;
//!
//! let documents = vec![
//!     "transfer million dollars urgent".to_string(),
//!     "meeting agenda attached".to_string(),
//! ];
//!
//! let mut vectorizer = CountVectorizer::new().unwrap();
//! vectorizer.fit(&documents).unwrap();
//!
//! let features = vectorizer.transform("urgent transfer").unwrap();
//! assert_eq!(features.len(), vectorizer.vocabulary_size());
//! assert_eq!(features.iter().sum::<u32>(), 2);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{StopWords, WordTokenizer};
use crate::error::{AffError, Result};

/// Default upper bound on vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// An ordered, deduplicated token-to-index mapping, frozen after fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Terms in index order.
    terms: Vec<String>,
    /// Reverse lookup: term -> index.
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from terms already in index order.
    pub fn from_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Vocabulary { terms, index }
    }

    /// Get the index of a term, if present.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Get the term at an index.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|s| s.as_str())
    }

    /// Number of terms in the vocabulary.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Bag-of-words vectorizer with a bounded, stop-word-filtered vocabulary.
///
/// `fit` ranks tokens by document frequency and keeps the top
/// `max_features`; equal frequencies are broken by ascending lexical order so
/// the index assignment is deterministic across runs.
#[derive(Clone, Debug)]
pub struct CountVectorizer {
    tokenizer: WordTokenizer,
    stop_words: StopWords,
    max_features: usize,
    vocabulary: Option<Vocabulary>,
}

impl CountVectorizer {
    /// Create an unfitted vectorizer with default settings: `\w+`
    /// tokenization, English stop words, at most
    /// [`DEFAULT_MAX_FEATURES`] terms.
    pub fn new() -> Result<Self> {
        Ok(CountVectorizer {
            tokenizer: WordTokenizer::new()?,
            stop_words: StopWords::new(),
            max_features: DEFAULT_MAX_FEATURES,
            vocabulary: None,
        })
    }

    /// Set the maximum vocabulary size.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Reconstruct a fitted vectorizer from a persisted vocabulary.
    pub fn from_vocabulary(vocabulary: Vocabulary) -> Result<Self> {
        let mut vectorizer = Self::new()?;
        vectorizer.max_features = vectorizer.max_features.max(vocabulary.len());
        vectorizer.vocabulary = Some(vocabulary);
        Ok(vectorizer)
    }

    /// Fit the vocabulary on cleaned training documents.
    ///
    /// Tokens are ranked by the number of documents they appear in; the top
    /// `max_features` survive, ties broken by lexical order.
    pub fn fit(&mut self, documents: &[String]) -> Result<&Vocabulary> {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: Vec<String> = self
                .tokenizer
                .tokenize(doc)
                .into_iter()
                .filter(|t| !self.stop_words.contains(t))
                .collect();
            seen.sort_unstable();
            seen.dedup();

            for token in seen {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = document_frequency.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let terms = ranked.into_iter().map(|(term, _)| term).collect();
        self.vocabulary = Some(Vocabulary::from_terms(terms));

        Ok(self.vocabulary.as_ref().unwrap())
    }

    /// Transform a cleaned text into a count vector over the frozen
    /// vocabulary. Out-of-vocabulary tokens are dropped silently.
    pub fn transform(&self, text: &str) -> Result<Vec<u32>> {
        let vocabulary = self.require_fitted()?;
        let mut counts = vec![0u32; vocabulary.len()];

        for token in self.tokenizer.tokenize(text) {
            if let Some(idx) = vocabulary.get(&token) {
                counts[idx] += 1;
            }
        }

        Ok(counts)
    }

    /// Transform a batch of cleaned texts.
    pub fn transform_batch(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.transform(t)).collect()
    }

    /// The fitted vocabulary, if any.
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Size of the fitted vocabulary (0 before fitting).
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.as_ref().map_or(0, |v| v.len())
    }

    fn require_fitted(&self) -> Result<&Vocabulary> {
        self.vocabulary
            .as_ref()
            .ok_or_else(|| AffError::not_fitted("transform called before fit"))
    }
}
