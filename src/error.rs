use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown to callers when the generation service could not be reached.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Unable to connect to AI service. Please try again.";

#[derive(Debug, Error)]
pub enum StylistError {
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("generation service unavailable after retries")]
    Transport,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StylistError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl StylistError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StylistError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            StylistError::Validation(_) => StatusCode::BAD_REQUEST,
            StylistError::Transport
            | StylistError::Configuration(_)
            | StylistError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing payload. Internal details stay in the logs.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            StylistError::RateLimitExceeded => ErrorResponse::new("rate_limit"),
            StylistError::Validation(msg) => ErrorResponse::new(msg.as_str()),
            StylistError::Transport => ErrorResponse::new(TRANSPORT_ERROR_MESSAGE),
            StylistError::Configuration(_) | StylistError::Internal(_) => {
                ErrorResponse::new("Error occurred. Please try again.")
            }
        }
    }
}

impl IntoResponse for StylistError {
    fn into_response(self) -> Response {
        match &self {
            StylistError::Configuration(msg) | StylistError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}
