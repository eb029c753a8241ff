//! Lexicon scorer implementation

use async_trait::async_trait;
use regex::Regex;

use senti_core::{Error, Polarity, Result, SentimentScorer};

use crate::lexicon::{Lexicon, NEGATION_FACTOR};

/// Pattern-style scorer driven by a word lexicon.
///
/// Each sentiment-bearing word contributes one assessment, scaled by any
/// pending intensifiers and flipped by a pending negation. The polarity of
/// the text is the mean of its assessments, or 0.0 when there are none.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Lexicon,
    token_pattern: Regex,
}

impl LexiconScorer {
    /// Create a scorer using the built-in lexicon
    pub fn new() -> Result<Self> {
        Self::with_lexicon(Lexicon::default())
    }

    /// Create a scorer using a custom lexicon
    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self> {
        let token_pattern = Regex::new(r"[a-z]+(?:'[a-z]+)?|[.,;:!?]")
            .map_err(|e| Error::Configuration(format!("invalid token pattern: {}", e)))?;

        Ok(Self {
            lexicon,
            token_pattern,
        })
    }

    /// Compute the polarity of `text` synchronously
    pub fn polarity(&self, text: &str) -> Polarity {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");

        let mut assessments = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in self.token_pattern.find_iter(&normalized) {
            let token = token.as_str();

            if self.lexicon.is_clause_break(token) {
                intensity = 1.0;
                negated = false;
            } else if let Some(value) = self.lexicon.polarity(token) {
                let mut assessment = value * intensity;
                if negated {
                    assessment *= NEGATION_FACTOR;
                }
                assessments.push(assessment.clamp(Polarity::MIN, Polarity::MAX));
                intensity = 1.0;
                negated = false;
            } else if let Some(factor) = self.lexicon.intensity(token) {
                intensity *= factor;
            } else if self.lexicon.is_negation(token) {
                negated = !negated;
            }
        }

        if assessments.is_empty() {
            return Polarity::NEUTRAL;
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        Polarity::new(mean)
    }

    /// Number of sentiment-bearing words the scorer knows
    pub fn vocabulary_size(&self) -> usize {
        self.lexicon.word_count()
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<Polarity> {
        Ok(self.polarity(text))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
