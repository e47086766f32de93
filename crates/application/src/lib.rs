//! Application layer for Compass
//!
//! Orchestrates the domain model behind the use-case traits the HTTP layer
//! depends on.
//!
//! ## Modules
//!
//! - `services` - Use-case traits, repository ports and their implementations
//! - `validation` - Input validation for use-case requests

pub mod services;
pub mod validation;

pub use services::{
    DataSourceDto, DataSourceRepositoryPort, DataSourceService, DataSourceUseCases,
    ServiceContext,
};
pub use validation::{CreateDataSourceRequest, Validatable, ValidationResult};

use compass_domain::DataSourceError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation not provided by this use-case implementation
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Backing store unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::NotImplemented(_) => 501,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::NotImplemented(_) => "NOT_IMPLEMENTED",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Whether this error originates on the server side (5xx)
    pub fn is_server_error(&self) -> bool {
        self.http_status() >= 500
    }
}

impl From<DataSourceError> for ApplicationError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::NotFound(_) => Self::NotFound(err.to_string()),
            DataSourceError::DuplicateName(_) => Self::Conflict(err.to_string()),
            DataSourceError::InvalidName(_)
            | DataSourceError::InvalidPluginSrc(_)
            | DataSourceError::InvalidDefinition(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
