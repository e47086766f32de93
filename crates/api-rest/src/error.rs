//! HTTP error handling and conversion.
//!
//! Every handler error goes through [`ApiError::into_response`]: the full
//! detail is logged, and 500/503 responses carry a fixed generic message
//! instead of the error text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compass_application::ApplicationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Client-facing message for every server-side failure
pub const GENERIC_SERVER_ERROR_MESSAGE: &str = "Error doing the process";

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Bad request (malformed header, path or body)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Structural validation of a request body failed
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_FAILED",
        }
    }

    /// Whether the client only sees [`GENERIC_SERVER_ERROR_MESSAGE`]
    pub fn is_masked(&self) -> bool {
        matches!(
            self.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE
        )
    }

    /// Message returned to the client
    pub fn client_message(&self) -> String {
        if self.is_masked() {
            GENERIC_SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            request_id: None,
        }
    }

    /// Add request ID to the error response
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                error_code = error_code,
                error = %self,
                "Request failed"
            );
        } else {
            warn!(
                status = status.as_u16(),
                error_code = error_code,
                error = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse::new(error_code, self.client_message());

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
