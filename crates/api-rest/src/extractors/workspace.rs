//! Workspace scope extractor.
//!
//! Every data source route is scoped by the `workspaceId` request header.
//! The extractor parses it and bundles it with the request ID into a
//! [`ServiceContext`] for the use-case call.

use crate::{error::ApiError, middleware::RequestId};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use compass_application::ServiceContext;
use compass_domain::WorkspaceId;

/// Header naming the workspace a request operates on
pub const WORKSPACE_HEADER: &str = "workspaceid";

/// Workspace-scoped request context
#[derive(Debug, Clone)]
pub struct WorkspaceScope(pub ServiceContext);

impl WorkspaceScope {
    /// Workspace the request is scoped to
    pub fn workspace_id(&self) -> WorkspaceId {
        self.0.workspace_id
    }

    /// Service context to pass to the use cases
    pub fn context(&self) -> &ServiceContext {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for WorkspaceScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(WORKSPACE_HEADER)
            .ok_or_else(|| ApiError::BadRequest("Missing workspaceId header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::BadRequest("workspaceId header is not valid text".to_string()))?;

        let workspace_id: WorkspaceId = raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid workspaceId: {}", raw)))?;

        let correlation_id = parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);

        Ok(WorkspaceScope(ServiceContext::new(
            workspace_id,
            correlation_id.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<WorkspaceScope, ApiError> {
        let (mut parts, _) = req.into_parts();
        WorkspaceScope::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header() {
        let ws = WorkspaceId::new();
        let mut req = Request::builder()
            .header("workspaceId", ws.to_string())
            .body(())
            .unwrap();
        req.extensions_mut().insert(RequestId("req-7".to_string()));

        let scope = extract(req).await.unwrap();
        assert_eq!(scope.workspace_id(), ws);
        assert_eq!(scope.context().correlation_id, "req-7");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let req = Request::builder().body(()).unwrap();
        let err = extract(req).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_malformed_header() {
        let req = Request::builder()
            .header("workspaceId", "not-a-uuid")
            .body(())
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
