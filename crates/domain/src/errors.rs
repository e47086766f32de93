//! Error types for the Compass domain.

use crate::identifiers::DataSourceId;

/// Data source errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataSourceError {
    /// Data source not found in the requesting workspace
    #[error("Data source not found: {0}")]
    NotFound(DataSourceId),

    /// Name already taken in the workspace
    #[error("Data source name already in use: {0}")]
    DuplicateName(String),

    /// Name blank or too long
    #[error("Invalid data source name: {0:?}")]
    InvalidName(String),

    /// Plugin source blank or too long
    #[error("Invalid plugin source: {0:?}")]
    InvalidPluginSrc(String),

    /// Anything else structurally wrong with the definition
    #[error("Invalid data source definition: {0}")]
    InvalidDefinition(String),
}

impl DataSourceError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "DATASOURCE_NOT_FOUND",
            Self::DuplicateName(_) => "DATASOURCE_DUPLICATE_NAME",
            Self::InvalidName(_) | Self::InvalidPluginSrc(_) | Self::InvalidDefinition(_) => {
                "DATASOURCE_INVALID"
            }
        }
    }
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DataSourceError>;
