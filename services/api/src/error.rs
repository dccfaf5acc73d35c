//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how each
//! variant is rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legal_assistant_core::ports::PortError;
use serde_json::json;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input. Always the client's fault.
    #[error("{0}")]
    Validation(String),

    /// A lookup by id or slug found nothing.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The upload exceeded the transport body limit.
    #[error("Uploaded payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    /// The speech-to-text adapter failed.
    #[error("Transcription failed: {0}")]
    Transcription(#[source] PortError),

    /// An external collaborator (analyzer, extractor, store) failed. The
    /// `context` is the message shown to the client.
    #[error("{context}: {source}")]
    ExternalService {
        context: &'static str,
        #[source]
        source: PortError,
    },

    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps a port failure, keeping `NotFound` as a 404.
    pub fn external(context: &'static str, source: PortError) -> Self {
        match source {
            PortError::NotFound(what) => ApiError::NotFound(what),
            source => ApiError::ExternalService { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Transcription(_)
            | ApiError::ExternalService { .. }
            | ApiError::Config(_)
            | ApiError::Io(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 5xx bodies carry a fixed message; the details only go to the log.
        let message = match &self {
            ApiError::Transcription(_) => "Failed to process voice message".to_string(),
            ApiError::ExternalService { context, .. } => context.to_string(),
            ApiError::Config(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
