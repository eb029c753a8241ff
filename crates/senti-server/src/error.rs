//! Mapping of service errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use senti_core::Error;

/// Error returned by request handlers
#[derive(Debug)]
pub enum ApiError {
    /// Failure from the analyzer, a scorer or a repository
    Service(Error),
    /// The request body was not the JSON we expected
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(Error::MissingText) => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    /// Message placed in the `error` field of the response body
    pub fn message(&self) -> String {
        match self {
            ApiError::Service(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
