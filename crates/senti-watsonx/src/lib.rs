//! watsonx.ai backed polarity scoring for senti
//!
//! This crate provides an implementation of the SentimentScorer trait that
//! asks a hosted foundation model to rate the polarity of a text.

mod client;
mod config;


pub use client::WatsonxScorer;
pub use config::WatsonxConfig;

// Re-export core types for convenience
pub use senti_core::{Error, Polarity, Result, SentimentScorer};
