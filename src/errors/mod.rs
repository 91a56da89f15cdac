/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Failures talking to the upstream provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("NASA API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Could not reach NASA API ({0})")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from NASA API: {0}")]
    UnexpectedShape(String),
}

impl UpstreamError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        UpstreamError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

/// Errors surfaced at the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        error: &'static str,
        message: String,
    },
    #[error("Route not found")]
    NotFound,
    #[error("Too many requests from this IP, please try again later.")]
    RateLimited,
    #[error("{error}: {source}")]
    Failed {
        error: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn missing(message: impl Into<String>) -> Self {
        ApiError::Validation {
            error: "Missing required parameters",
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation {
            error: "Invalid parameter",
            message: message.into(),
        }
    }

    /// Wraps an upstream failure with the route's short error text.
    pub fn failed(error: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| ApiError::Failed { error, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, message) = match &self {
            ApiError::Validation { error, message } => (error.to_string(), message.clone()),
            ApiError::NotFound => (
                "Route not found".to_string(),
                "The requested endpoint does not exist".to_string(),
            ),
            ApiError::RateLimited => ("Too many requests".to_string(), self.to_string()),
            ApiError::Failed { error, source } => {
                tracing::error!(error = %error, cause = %source, "upstream request failed");
                (error.to_string(), source.to_string())
            }
        };

        (self.status_code(), Json(ErrorResponse { error, message })).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Type alias for upstream client results
pub type UpstreamResult<T> = Result<T, UpstreamError>;
