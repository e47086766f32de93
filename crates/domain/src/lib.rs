//! Compass Domain Types
//!
//! Core domain model for the Compass data source service.
//!
//! ## Modules
//!
//! - **identifiers**: Strongly-typed UUID identifiers
//! - **datasource**: The data source entity and its invariants
//! - **errors**: Domain error types
//!
//! ## Usage
//!
//! ```rust
//! use compass_domain::{DataSource, WorkspaceId};
//!
//! let workspace = WorkspaceId::new();
//! let ds = DataSource::new(workspace, "prometheus-prod", "prometheus", false, serde_json::json!({}))
//!     .unwrap();
//! assert!(ds.belongs_to(&workspace));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datasource;
pub mod errors;
pub mod identifiers;

pub use datasource::DataSource;
pub use errors::{DataSourceError, DomainResult};
pub use identifiers::*;
