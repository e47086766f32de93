//! Panic and fallback handlers.

use super::request_id::RequestId;
use crate::error::{ErrorResponse, GENERIC_SERVER_ERROR_MESSAGE};
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{error, warn};

/// Convert a handler panic into a 500 response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(details = %details, "Handler panicked");

    let body = ErrorResponse::new("INTERNAL_ERROR", GENERIC_SERVER_ERROR_MESSAGE);

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Fallback for unknown routes
pub async fn handle_not_found(uri: Uri, request_id: Option<Extension<RequestId>>) -> Response {
    warn!(uri = %uri, "No route matched");

    let mut body = ErrorResponse::new("NOT_FOUND", format!("No route for {}", uri.path()));
    if let Some(Extension(request_id)) = request_id {
        body = body.with_request_id(request_id.to_string());
    }

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
