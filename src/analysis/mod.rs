//! Text analysis for the classification pipeline.
//!
//! Raw message text goes through two stages before vectorization:
//!
//! 1. [`normalizer::TextNormalizer`] maps raw text to a lowercase,
//!    whitespace-collapsed token string.
//! 2. [`tokenizer::WordTokenizer`] splits the cleaned string into word
//!    tokens, with [`stop`] providing the English stop-word set that the
//!    vectorizer excludes from its vocabulary.

pub mod normalizer;
pub mod stop;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use stop::StopWords;
pub use tokenizer::WordTokenizer;
