//! HTTP middleware components.
//!
//! - Request ID propagation
//! - Request logging
//! - Panic and fallback handling

pub mod error_handler;
pub mod logging;
pub mod request_id;

pub use error_handler::{handle_not_found, handle_panic};
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
