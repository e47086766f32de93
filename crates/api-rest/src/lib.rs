//! Compass REST API
//!
//! Axum-based HTTP surface for workspace-scoped data sources, with OpenAPI
//! documentation, request tracing and a single error mapping policy.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and middleware stack
//! - **config**: Layered configuration
//! - **routes**: HTTP route handlers (health probes, `v1` data sources)
//! - **middleware**: Request ID, logging, panic and fallback handling
//! - **extractors**: Workspace scope and validated JSON
//! - **responses**: Standardized response types
//! - **error**: HTTP error handling and conversion
//! - **state**: Shared state and the in-memory repository
//!
//! ## Usage
//!
//! ```rust,no_run
//! use compass_api_rest::{create_app, ApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::load()?;
//!     let address = config.server_address();
//!     let app = create_app(config).await?;
//!
//!     let listener = tokio::net::TcpListener::bind(address).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{create_app, create_router};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::{AppState, InMemoryDataSourceRepository};
