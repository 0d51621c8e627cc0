//! # scamshield
//!
//! An advance-fee fraud (AFF) text classifier for Rust.
//!
//! ## Features
//!
//! - Deterministic text normalization for raw emails, SMS, and job postings
//! - Bag-of-words vectorization over a bounded, frozen vocabulary
//! - Multinomial Naive Bayes with Laplace smoothing
//! - Stratified holdout and k-fold evaluation with seeded shuffling
//! - Versioned model artifacts, loaded as a matched pair
//! - HTTP and CLI/REPL serving of predictions

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod feature;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod server;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
