//! Polarity scores and the three-way sentiment classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sentiment polarity in the closed range [-1.0, 1.0].
///
/// Negative values indicate negative sentiment, positive values positive
/// sentiment, and zero neutrality.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64")]
pub struct Polarity(f64);

impl Polarity {
    pub const MIN: f64 = -1.0;
    pub const MAX: f64 = 1.0;
    pub const NEUTRAL: Polarity = Polarity(0.0);

    /// Create a polarity, clamping into [-1.0, 1.0]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::NEUTRAL;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Get the raw value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Classify this polarity into a label
    pub fn label(self) -> SentimentLabel {
        classify(self.0)
    }
}

impl From<f64> for Polarity {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Coarse sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a polarity onto a label.
///
/// Total over every `f64`: strictly positive is Positive, strictly negative
/// is Negative, and everything else (zero, negative zero, NaN) is Neutral.
pub fn classify(polarity: f64) -> SentimentLabel {
    if polarity > 0.0 {
        SentimentLabel::Positive
    } else if polarity < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
