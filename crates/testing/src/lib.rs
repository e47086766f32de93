//! Testing utilities for Compass
//!
//! This crate provides:
//! - Test fixtures for data sources
//! - Builder patterns for test data construction
//! - Mock implementations of the repository port and the use cases
//!
//! # Examples
//!
//! ```
//! use compass_testing::builders::DataSourceBuilder;
//! use compass_domain::WorkspaceId;
//!
//! let workspace = WorkspaceId::new();
//! let ds = DataSourceBuilder::new()
//!     .in_workspace(workspace)
//!     .with_name("prometheus-prod")
//!     .build();
//! assert!(ds.belongs_to(&workspace));
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
