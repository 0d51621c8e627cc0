//! Feature extraction: bag-of-words vectorization over a frozen vocabulary.

pub mod vectorizer;

pub use vectorizer::{CountVectorizer, Vocabulary};
