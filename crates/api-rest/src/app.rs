//! Application builder and configuration.
//!
//! This module provides the main application builder that assembles
//! all routes, middleware, and state into an Axum router.

use crate::{
    config::ApiConfig,
    middleware::{handle_not_found, handle_panic, logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use compass_common::init_tracing;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router
///
/// Installs the global tracing subscriber, so call it once per process.
pub async fn create_app(config: ApiConfig) -> anyhow::Result<Router> {
    config.validate()?;
    init_tracing(&config.telemetry)?;

    info!(
        service = %config.telemetry.service_name,
        prefix = %config.api_prefix(),
        "Building application"
    );

    Ok(create_router(AppState::new(config)))
}

/// Assemble routes and middleware around an existing state
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .merge(routes::health::routes())
        .nest(&config.api_prefix(), routes::v1::routes())
        .fallback(handle_not_found)
        .with_state(state);

    if config.enable_swagger {
        app = app.merge(swagger_ui(&config));
    }

    app.layer(DefaultBodyLimit::max(config.max_body_size)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(build_cors_layer(&config))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(config.request_timeout())),
    )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::v1::datasources::list_data_sources,
        routes::v1::datasources::create_data_source,
        routes::v1::datasources::get_data_source,
        routes::v1::datasources::delete_data_source,
    ),
    components(schemas(
        routes::v1::datasources::DataSourceRepresentation,
        routes::v1::datasources::CreateDataSourceApiRequest,
        crate::responses::BaseEntityRepresentation,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "datasources", description = "Workspace data sources"),
    )
)]
struct DataSourceApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Compass API",
        version = "1.0.0",
        description = "REST API for Compass workspace data sources",
        license(name = "MIT"),
    ),
    paths(routes::health::health, routes::health::ready),
    components(schemas(
        routes::health::HealthResponse,
        routes::health::ReadinessResponse,
        routes::health::ReadinessChecks,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
    )
)]
struct ApiDoc;

/// Full OpenAPI document with data source paths under the configured prefix
pub fn openapi(config: &ApiConfig) -> utoipa::openapi::OpenApi {
    let prefix = config.api_prefix();

    let mut data_sources = DataSourceApiDoc::openapi();
    data_sources.paths.paths = std::mem::take(&mut data_sources.paths.paths)
        .into_iter()
        .map(|(path, item)| (format!("{}{}", prefix, path), item))
        .collect();

    let mut doc = ApiDoc::openapi();
    doc.merge(data_sources);
    doc
}

/// Create Swagger UI routes
fn swagger_ui(config: &ApiConfig) -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi(config))
}
