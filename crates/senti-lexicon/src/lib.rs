//! Lexicon-based polarity scoring for senti
//!
//! This crate provides the default implementation of the SentimentScorer
//! trait: a word lexicon with intensifiers and negation handling. It needs
//! no network access and always produces the same polarity for the same text.

mod lexicon;
mod scorer;


pub use lexicon::{Lexicon, NEGATION_FACTOR};
pub use scorer::LexiconScorer;

// Re-export core types for convenience
pub use senti_core::{Error, Polarity, Result, SentimentScorer};
