//! Request validation and scorer/classifier orchestration

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{Error, Polarity, Result, SentimentLabel, SentimentScorer};

/// Inbound analysis request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The text to score, if present and non-empty
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Outcome of analysing one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: SentimentLabel,
    pub polarity: Polarity,
}

impl Analysis {
    pub fn from_polarity(polarity: Polarity) -> Self {
        Self {
            sentiment: polarity.label(),
            polarity,
        }
    }
}

/// Validates requests, then runs the scorer and the classifier.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Name of the underlying scorer
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Analyse a request. Missing or empty text fails with
    /// [`Error::MissingText`] and never reaches the scorer.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis> {
        let text = request.text().ok_or(Error::MissingText)?;
        self.score_text(text).await
    }

    /// Analyse a bare string
    pub async fn analyze_text(&self, text: &str) -> Result<Analysis> {
        if text.is_empty() {
            return Err(Error::MissingText);
        }
        self.score_text(text).await
    }

    async fn score_text(&self, text: &str) -> Result<Analysis> {
        let polarity = self.scorer.score(text).await?;
        let analysis = Analysis::from_polarity(polarity);
        debug!(
            scorer = self.scorer.name(),
            polarity = polarity.value(),
            sentiment = %analysis.sentiment,
            "text analysed"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScorer {
        polarity: f64,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentScorer for CountingScorer {
        async fn score(&self, _text: &str) -> Result<Polarity> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Polarity::new(self.polarity))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl SentimentScorer for FailingScorer {
        async fn score(&self, _text: &str) -> Result<Polarity> {
            Err(Error::Scorer("engine unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn counting(polarity: f64) -> Arc<CountingScorer> {
        Arc::new(CountingScorer {
            polarity,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_missing_text_skips_scorer() {
        let scorer = counting(0.9);
        let analyzer = SentimentAnalyzer::new(scorer.clone());

        for request in [AnalysisRequest::default(), AnalysisRequest::new("")] {
            let err = analyzer.analyze(&request).await.unwrap_err();
            assert!(matches!(err, Error::MissingText));
        }
        assert!(matches!(
            analyzer.analyze_text("").await,
            Err(Error::MissingText)
        ));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_positive_and_negative_texts() {
        let analyzer = SentimentAnalyzer::new(counting(0.625));
        let analysis = analyzer
            .analyze(&AnalysisRequest::new("I love this"))
            .await
            .unwrap();
        assert_eq!(analysis.sentiment, SentimentLabel::Positive);
        assert_eq!(analysis.polarity.value(), 0.625);

        let analyzer = SentimentAnalyzer::new(counting(-0.8));
        let analysis = analyzer.analyze_text("I hate this").await.unwrap();
        assert_eq!(analysis.sentiment, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_whitespace_text_is_scored() {
        let scorer = counting(0.0);
        let analyzer = SentimentAnalyzer::new(scorer.clone());
        let analysis = analyzer.analyze(&AnalysisRequest::new("   ")).await.unwrap();
        assert_eq!(analysis.sentiment, SentimentLabel::Neutral);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analysis_from_json_keeps_polarity_in_range() {
        let analysis: Analysis =
            serde_json::from_str(r#"{"sentiment": "Positive", "polarity": 3.0}"#).unwrap();
        assert_eq!(analysis.polarity.value(), 1.0);
    }

    #[test]
    fn test_scorer_name() {
        let analyzer = SentimentAnalyzer::new(counting(0.1));
        assert_eq!(analyzer.scorer_name(), "counting");
    }

    #[tokio::test]
    async fn test_scorer_errors_propagate() {
        let analyzer = SentimentAnalyzer::new(Arc::new(FailingScorer));
        let err = analyzer.analyze_text("anything").await.unwrap_err();
        assert!(matches!(err, Error::Scorer(_)));
    }
}
