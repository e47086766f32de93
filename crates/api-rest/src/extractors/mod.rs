//! Custom Axum extractors.

pub mod validated_json;
pub mod workspace;

pub use validated_json::ValidatedJson;
pub use workspace::{WorkspaceScope, WORKSPACE_HEADER};
