//! Scorer capability: text in, polarity out

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Polarity, Result};

/// Trait for sentiment scorers (e.g., lexicon, watsonx, etc.)
///
/// A scorer turns free-form text into a [`Polarity`]. Implementations must
/// be safe to share across concurrent requests.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score the polarity of `text`
    async fn score(&self, text: &str) -> Result<Polarity>;

    /// Short name of the scoring engine, used in logs
    fn name(&self) -> &str;
}

/// Available scoring engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Built-in word lexicon
    #[default]
    Lexicon,
    /// IBM watsonx.ai hosted model
    Watsonx,
}

impl ScorerKind {
    /// Get the configuration name for this scorer
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerKind::Lexicon => "lexicon",
            ScorerKind::Watsonx => "watsonx",
        }
    }

    /// Get all supported scorers
    pub fn all() -> Vec<ScorerKind> {
        vec![ScorerKind::Lexicon, ScorerKind::Watsonx]
    }
}

impl FromStr for ScorerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" | "local" => Ok(ScorerKind::Lexicon),
            "watsonx" | "ibm" => Ok(ScorerKind::Watsonx),
            other => Err(Error::Configuration(format!(
                "unknown scorer '{}', expected one of: lexicon, watsonx",
                other
            ))),
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorer_kind_parsing() {
        assert_eq!("lexicon".parse::<ScorerKind>().unwrap(), ScorerKind::Lexicon);
        assert_eq!("WatsonX".parse::<ScorerKind>().unwrap(), ScorerKind::Watsonx);
        assert_eq!(" ibm ".parse::<ScorerKind>().unwrap(), ScorerKind::Watsonx);
        assert!(matches!(
            "textblob".parse::<ScorerKind>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_scorer_kind_round_trips_through_display() {
        for kind in ScorerKind::all() {
            assert_eq!(kind.to_string().parse::<ScorerKind>().unwrap(), kind);
        }
    }
}
