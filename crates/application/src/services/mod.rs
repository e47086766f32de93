//! Application Services
//!
//! Use-case traits consumed by the HTTP layer, the repository ports they
//! depend on, and their implementations.

mod datasource;

pub use datasource::*;

use compass_domain::WorkspaceId;

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Workspace every operation in this request is scoped to
    pub workspace_id: WorkspaceId,
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    pub fn new(workspace_id: WorkspaceId, correlation_id: impl Into<String>) -> Self {
        Self {
            workspace_id,
            correlation_id: correlation_id.into(),
        }
    }
}
