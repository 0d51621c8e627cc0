//! Probabilistic classification over bag-of-words count vectors.

pub mod naive_bayes;

pub use naive_bayes::MultinomialNb;
