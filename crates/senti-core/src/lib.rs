//! Core traits and types for senti
//!
//! This crate defines the polarity and label types, the pure classifier that
//! maps one onto the other, the scorer capability that produces polarities
//! from text, and the feedback records stored by the service. Scorer and
//! repository implementations live in their own crates.

pub mod analyzer;
pub mod error;
pub mod feedback;
pub mod polarity;
pub mod scorer;


pub use analyzer::{Analysis, AnalysisRequest, SentimentAnalyzer};
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackRepository, NewFeedback, SentimentSummary, newest_first};
pub use polarity::{Polarity, SentimentLabel, classify};
pub use scorer::{ScorerKind, SentimentScorer};
