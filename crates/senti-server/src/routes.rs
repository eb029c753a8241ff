//! Router and request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use senti_core::{
    AnalysisRequest, Error, Feedback, NewFeedback, SentimentLabel, SentimentSummary,
};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Body of a successful `/analyze` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub sentiment: SentimentLabel,
}

/// Body of a successful feedback submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackCreated {
    pub success: bool,
    pub feedback: Feedback,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/api/feedback", post(submit_feedback).get(list_feedback))
        .route("/api/feedback/summary", get(feedback_summary))
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).await?;
    let app = router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, scorer = %config.scorer, "senti listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("senti stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    let analysis = state.analyzer.analyze(&request).await?;

    Ok(Json(AnalyzeResponse {
        sentiment: analysis.sentiment,
    }))
}

async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<NewFeedback>, JsonRejection>,
) -> Result<Json<FeedbackCreated>, ApiError> {
    let Json(mut submission) = payload?;

    let message = submission
        .message
        .take()
        .filter(|message| !message.is_empty())
        .ok_or(Error::MissingText)?;

    let analysis = state.analyzer.analyze_text(&message).await?;
    let feedback = Feedback::new(submission, message, analysis.sentiment);
    state.feedback.save(feedback.clone()).await?;

    info!(id = %feedback.id, sentiment = %feedback.sentiment, "feedback stored");

    Ok(Json(FeedbackCreated {
        success: true,
        feedback,
    }))
}

async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, ApiError> {
    Ok(Json(state.feedback.find_all().await?))
}

async fn feedback_summary(
    State(state): State<AppState>,
) -> Result<Json<SentimentSummary>, ApiError> {
    Ok(Json(state.feedback.summary().await?))
}
