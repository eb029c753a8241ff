//! Feedback entries and their storage interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, SentimentLabel};

/// A stored, labelled feedback message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub sentiment: SentimentLabel,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Create a new entry stamped with a fresh id and the current time
    pub fn new(submission: NewFeedback, message: String, sentiment: SentimentLabel) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            message,
            sentiment,
            created_at: Utc::now(),
        }
    }
}

/// Feedback as submitted by a client, before labelling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-label counts across stored feedback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
    pub total: usize,
}

impl SentimentSummary {
    /// Count a single label
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
        self.total += 1;
    }

    /// Get the count for one label
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}

impl<'a> FromIterator<&'a Feedback> for SentimentSummary {
    fn from_iter<I: IntoIterator<Item = &'a Feedback>>(iter: I) -> Self {
        let mut summary = SentimentSummary::default();
        for feedback in iter {
            summary.record(feedback.sentiment);
        }
        summary
    }
}

/// Storage for labelled feedback
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a feedback entry
    async fn save(&self, feedback: Feedback) -> Result<()>;

    /// All entries, newest first
    async fn find_all(&self) -> Result<Vec<Feedback>>;

    /// Label counts across all entries
    async fn summary(&self) -> Result<SentimentSummary> {
        let all = self.find_all().await?;
        Ok(all.iter().collect())
    }
}

/// Order entries newest first. Entries sharing a timestamp keep reverse
/// insertion order, so the later submission still comes first.
pub fn newest_first(mut entries: Vec<Feedback>) -> Vec<Feedback> {
    entries.reverse();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}
