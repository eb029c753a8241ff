//! Shared handler state

use std::sync::Arc;
use tracing::info;

use senti_core::{FeedbackRepository, Result, ScorerKind, SentimentAnalyzer, SentimentScorer};
use senti_lexicon::LexiconScorer;
use senti_watsonx::WatsonxScorer;

use crate::config::ServerConfig;
use crate::store::{FileFeedbackRepository, InMemoryFeedbackRepository};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub analyzer: SentimentAnalyzer,
    pub feedback: Arc<dyn FeedbackRepository>,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { analyzer, feedback }
    }

    /// State with the given scorer and in-memory feedback storage
    pub fn with_scorer(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self::new(
            SentimentAnalyzer::new(scorer),
            Arc::new(InMemoryFeedbackRepository::new()),
        )
    }

    /// Build the scorer and repository described by `config`
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let scorer = build_scorer(config.scorer).await?;

        let feedback: Arc<dyn FeedbackRepository> = match &config.feedback_file {
            Some(path) => {
                info!(path = %path.display(), "persisting feedback to file");
                Arc::new(FileFeedbackRepository::new(path)?)
            }
            None => {
                info!("keeping feedback in memory");
                Arc::new(InMemoryFeedbackRepository::new())
            }
        };

        Ok(Self::new(SentimentAnalyzer::new(scorer), feedback))
    }
}

/// Construct and, where needed, authenticate a scorer
pub async fn build_scorer(kind: ScorerKind) -> Result<Arc<dyn SentimentScorer>> {
    let scorer: Arc<dyn SentimentScorer> = match kind {
        ScorerKind::Lexicon => {
            let scorer = LexiconScorer::new()?;
            info!(words = scorer.vocabulary_size(), "lexicon scorer ready");
            Arc::new(scorer)
        }
        ScorerKind::Watsonx => {
            let scorer = WatsonxScorer::from_env()?;
            scorer.connect().await?;
            info!(model = scorer.model_id(), "watsonx scorer ready");
            Arc::new(scorer)
        }
    };

    Ok(scorer)
}
