//! Integration tests for the data source endpoints
//!
//! Drives the full router (middleware included) with `oneshot` requests,
//! against both the mock use cases and the in-memory service stack.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use compass_api_rest::{create_router, ApiConfig, AppState};
use compass_application::{ApplicationError, DataSourceUseCases};
use compass_domain::{DataSourceId, WorkspaceId};
use compass_testing::{
    builders::DataSourceBuilder,
    fixtures::create_test_data_sources,
    mocks::{MockDataSourceUseCases, ReadOnlyDataSourceUseCases},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const GENERIC_MESSAGE: &str = "Error doing the process";

fn test_config() -> ApiConfig {
    ApiConfig {
        enable_swagger: false,
        ..Default::default()
    }
}

fn app_with(use_cases: Arc<dyn DataSourceUseCases>) -> Router {
    create_router(AppState::with_use_cases(test_config(), use_cases))
}

fn in_memory_app() -> Router {
    create_router(AppState::new(test_config()))
}

fn request(method: &str, uri: &str, workspace: Option<WorkspaceId>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(ws) = workspace {
        builder = builder.header("workspaceId", ws.to_string());
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_returns_array_in_use_case_order() {
    let ws = WorkspaceId::new();
    let sources = create_test_data_sources(ws, 3);
    let expected: Vec<String> = sources.iter().map(|ds| ds.id.to_string()).collect();
    let app = app_with(Arc::new(MockDataSourceUseCases::with_data_sources(sources)));

    let (status, body) = send_json(&app, request("GET", "/api/v1/datasource", Some(ws), None)).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
    assert_eq!(ids, expected);

    for item in items {
        assert!(item["name"].is_string());
        assert!(item["health"].is_boolean());
        assert!(item["createdAt"].is_string());
        assert_eq!(item["workspaceId"], ws.to_string());
        assert!(item.get("data").is_none());
    }
}

#[tokio::test]
async fn test_list_empty_workspace() {
    let app = app_with(Arc::new(MockDataSourceUseCases::new()));

    let (status, body) =
        send_json(&app, request("GET", "/api/v1/datasource", Some(WorkspaceId::new()), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_failure_is_masked() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    mock.fail_with(ApplicationError::Internal("db connection refused".into()));
    let app = app_with(mock);

    let (status, body) =
        send_json(&app, request("GET", "/api/v1/datasource", Some(WorkspaceId::new()), None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], GENERIC_MESSAGE);
    assert!(!body.to_string().contains("db connection refused"));
}

#[tokio::test]
async fn test_list_unavailable_is_masked() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    mock.fail_with(ApplicationError::ServiceUnavailable("pool exhausted".into()));
    let app = app_with(mock);

    let (status, body) =
        send_json(&app, request("GET", "/api/v1/datasource", Some(WorkspaceId::new()), None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], GENERIC_MESSAGE);
}

// ---------------------------------------------------------------------------
// Workspace header
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_workspace_header_is_rejected_before_use_case() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(mock.clone());

    let (status, body) = send_json(&app, request("GET", "/api/v1/datasource", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(mock.log.is_empty());
}

#[tokio::test]
async fn test_malformed_workspace_header_is_rejected_before_use_case() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(mock.clone());

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/datasource/{}", DataSourceId::new()))
        .header("workspaceId", "workspace-one")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.log.delete_count(), 0);
    assert!(mock.log.is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_existing_returns_204_with_empty_body() {
    let ws = WorkspaceId::new();
    let ds = DataSourceBuilder::new().in_workspace(ws).build();
    let id = ds.id;
    let mock = Arc::new(MockDataSourceUseCases::with_data_sources([ds]));
    let app = app_with(mock.clone());

    let (status, bytes) = send(
        &app,
        request("DELETE", &format!("/api/v1/datasource/{}", id), Some(ws), None),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());
    assert!(!mock.contains(&id));
    assert_eq!(mock.log.delete_count(), 1);
}

#[tokio::test]
async fn test_delete_missing_is_404_every_time() {
    let ws = WorkspaceId::new();
    let app = app_with(Arc::new(MockDataSourceUseCases::new()));
    let uri = format!("/api/v1/datasource/{}", DataSourceId::new());

    for _ in 0..2 {
        let (status, body) = send_json(&app, request("DELETE", &uri, Some(ws), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_delete_once_then_404() {
    let ws = WorkspaceId::new();
    let ds = DataSourceBuilder::new().in_workspace(ws).build();
    let uri = format!("/api/v1/datasource/{}", ds.id);
    let app = app_with(Arc::new(MockDataSourceUseCases::with_data_sources([ds])));

    let (first, _) = send(&app, request("DELETE", &uri, Some(ws), None)).await;
    let (second, _) = send(&app, request("DELETE", &uri, Some(ws), None)).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_failure_is_masked_and_logged_only() {
    let ws = WorkspaceId::new();
    let mock = Arc::new(MockDataSourceUseCases::new());
    mock.fail_with(ApplicationError::Internal("constraint violation on fk_panel".into()));
    let app = app_with(mock);

    let (status, body) = send_json(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/datasource/{}", DataSourceId::new()),
            Some(ws),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], GENERIC_MESSAGE);
    assert!(!body.to_string().contains("fk_panel"));
}

#[tokio::test]
async fn test_delete_malformed_id_is_400() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(mock.clone());

    let (status, body) = send_json(
        &app,
        request("DELETE", "/api/v1/datasource/42", Some(WorkspaceId::new()), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(mock.log.delete_count(), 0);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_post_with_id_body_never_deletes() {
    let ws = WorkspaceId::new();
    let ds = DataSourceBuilder::new().in_workspace(ws).build();
    let id = ds.id;
    let mock = Arc::new(MockDataSourceUseCases::with_data_sources([ds]));
    let app = app_with(mock.clone());

    let (status, _) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(ws),
            Some(json!({ "id": id.to_string() })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.log.delete_count(), 0);
    assert!(mock.contains(&id));
}

#[tokio::test]
async fn test_post_valid_body_creates() {
    let ws = WorkspaceId::new();
    let mock = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(mock.clone());

    let (status, body) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(ws),
            Some(json!({
                "name": "prometheus-prod",
                "pluginSrc": "prometheus",
                "health": true,
                "data": { "url": "http://prometheus:9090" },
                "id": "ignored"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "prometheus-prod");
    assert_eq!(body["pluginSrc"], "prometheus");
    assert_eq!(body["health"], true);
    assert_eq!(body["workspaceId"], ws.to_string());
    assert_ne!(body["id"], "ignored");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(mock.count(), 1);
    assert_eq!(mock.log.delete_count(), 0);
}

#[tokio::test]
async fn test_post_without_create_support_is_501() {
    let inner = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(Arc::new(ReadOnlyDataSourceUseCases::new(inner.clone())));

    let (status, body) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(WorkspaceId::new()),
            Some(json!({ "name": "prom", "pluginSrc": "prometheus" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["error"], "NOT_IMPLEMENTED");
    assert_eq!(inner.count(), 0);
    assert_eq!(inner.log.delete_count(), 0);
}

#[tokio::test]
async fn test_post_structural_validation_is_422() {
    let mock = Arc::new(MockDataSourceUseCases::new());
    let app = app_with(mock.clone());

    let (status, body) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(WorkspaceId::new()),
            Some(json!({ "name": "", "pluginSrc": "prometheus" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(mock.log.is_empty());
}

#[tokio::test]
async fn test_post_non_json_body_is_400() {
    let app = app_with(Arc::new(MockDataSourceUseCases::new()));

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/datasource")
        .header("workspaceId", WorkspaceId::new().to_string())
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Full in-memory stack
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_in_memory_lifecycle() {
    let app = in_memory_app();
    let ws = WorkspaceId::new();

    let (status, created) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(ws),
            Some(json!({ "name": "analytics", "pluginSrc": "google-analytics" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send_json(
        &app,
        request("GET", &format!("/api/v1/datasource/{}", id), Some(ws), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = send_json(&app, request("GET", "/api/v1/datasource", Some(ws), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/v1/datasource/{}", id), Some(ws), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, listed) = send_json(&app, request("GET", "/api/v1/datasource", Some(ws), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_in_memory_duplicate_name_is_409() {
    let app = in_memory_app();
    let ws = WorkspaceId::new();
    let body = json!({ "name": "Datadog", "pluginSrc": "datadog" });

    let (first, _) = send_json(&app, request("POST", "/api/v1/datasource", Some(ws), Some(body))).await;
    let (second, payload) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(ws),
            Some(json!({ "name": "datadog", "pluginSrc": "datadog" })),
        ),
    )
    .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(payload["error"], "CONFLICT");
}

#[tokio::test]
async fn test_workspace_isolation() {
    let app = in_memory_app();
    let owner = WorkspaceId::new();
    let stranger = WorkspaceId::new();

    let (_, created) = send_json(
        &app,
        request(
            "POST",
            "/api/v1/datasource",
            Some(owner),
            Some(json!({ "name": "private", "pluginSrc": "prometheus" })),
        ),
    )
    .await;
    let uri = format!("/api/v1/datasource/{}", created["id"].as_str().unwrap());

    let (_, listed) = send_json(&app, request("GET", "/api/v1/datasource", Some(stranger), None)).await;
    assert_eq!(listed, json!([]));

    let (status, _) = send_json(&app, request("GET", &uri, Some(stranger), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, request("DELETE", &uri, Some(stranger), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, request("GET", &uri, Some(owner), None)).await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Cross-cutting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = in_memory_app();

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-abc");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = in_memory_app();

    let (status, body) = send_json(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_json(&app, request("GET", "/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_unknown_route_is_404_json() {
    let app = in_memory_app();

    let (status, body) = send_json(&app, request("GET", "/api/v1/nothing", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["requestId"].is_string());
}

#[tokio::test]
async fn test_custom_prefix() {
    let config = ApiConfig {
        api_base_path: "/compass".to_string(),
        api_version: "v2".to_string(),
        enable_swagger: false,
        ..Default::default()
    };
    let app = create_router(AppState::new(config));

    let (status, _) = send_json(
        &app,
        request("GET", "/compass/v2/datasource", Some(WorkspaceId::new()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
