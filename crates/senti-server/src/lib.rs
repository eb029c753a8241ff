//! HTTP interface for senti
//!
//! Exposes the analyzer over `POST /analyze` and the feedback workflow under
//! `/api/feedback`. Server configuration is an explicit value built once at
//! startup and handed to [`serve`] or [`AppState::from_config`].

mod config;
mod error;
mod routes;
mod state;
mod store;


pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{AnalyzeResponse, FeedbackCreated, router, serve};
pub use state::{AppState, build_scorer};
pub use store::{FileFeedbackRepository, InMemoryFeedbackRepository};

// Re-export core types
pub use senti_core::{Error, Result};
