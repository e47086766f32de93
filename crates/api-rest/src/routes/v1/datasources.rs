//! Data source endpoints.

use crate::{
    error::{ApiError, ApiResult, ErrorResponse},
    extractors::{ValidatedJson, WorkspaceScope},
    responses::{BaseEntityRepresentation, Created, NoContent},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use compass_application::{CreateDataSourceRequest, DataSourceDto};
use compass_domain::DataSourceId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Data source as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceRepresentation {
    #[serde(flatten)]
    pub base: BaseEntityRepresentation,
    pub workspace_id: String,
    pub name: String,
    pub plugin_src: String,
    pub health: bool,
}

impl From<DataSourceDto> for DataSourceRepresentation {
    fn from(dto: DataSourceDto) -> Self {
        Self {
            base: BaseEntityRepresentation {
                id: dto.id,
                created_at: dto.created_at,
            },
            workspace_id: dto.workspace_id,
            name: dto.name,
            plugin_src: dto.plugin_src,
            health: dto.health,
        }
    }
}

/// Create data source request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataSourceApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub plugin_src: String,

    #[serde(default)]
    pub health: bool,

    /// Plugin connection settings
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl From<CreateDataSourceApiRequest> for CreateDataSourceRequest {
    fn from(req: CreateDataSourceApiRequest) -> Self {
        Self {
            name: req.name,
            plugin_src: req.plugin_src,
            health: req.health,
            data: req.data.unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Data source routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/datasource",
            get(list_data_sources).post(create_data_source),
        )
        .route(
            "/datasource/:id",
            get(get_data_source).delete(delete_data_source),
        )
}

fn parse_id(raw: &str) -> ApiResult<DataSourceId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid data source id: {}", raw)))
}

/// List data sources
///
/// All data sources of the workspace named by the `workspaceId` header.
#[utoipa::path(
    get,
    path = "/datasource",
    tag = "datasources",
    params(
        ("workspaceId" = String, Header, description = "Workspace UUID")
    ),
    responses(
        (status = 200, description = "Data sources of the workspace", body = [DataSourceRepresentation]),
        (status = 400, description = "Missing or invalid workspaceId", body = ErrorResponse),
        (status = 500, description = "Use-case failure", body = ErrorResponse),
    )
)]
pub async fn list_data_sources(
    State(state): State<AppState>,
    scope: WorkspaceScope,
) -> ApiResult<Json<Vec<DataSourceRepresentation>>> {
    let data_sources = state
        .data_sources
        .find_all_by_workspace(scope.context())
        .await?;

    Ok(Json(
        data_sources
            .into_iter()
            .map(DataSourceRepresentation::from)
            .collect(),
    ))
}

/// Create data source
#[utoipa::path(
    post,
    path = "/datasource",
    tag = "datasources",
    params(
        ("workspaceId" = String, Header, description = "Workspace UUID")
    ),
    request_body = CreateDataSourceApiRequest,
    responses(
        (status = 201, description = "Data source created", body = DataSourceRepresentation),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 409, description = "Name already used in the workspace", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 501, description = "Creation not available", body = ErrorResponse),
    )
)]
pub async fn create_data_source(
    State(state): State<AppState>,
    scope: WorkspaceScope,
    ValidatedJson(req): ValidatedJson<CreateDataSourceApiRequest>,
) -> ApiResult<Created<DataSourceRepresentation>> {
    let created = state
        .data_sources
        .create(scope.context(), req.into())
        .await?;

    Ok(Created(created.into()))
}

/// Get data source by ID
#[utoipa::path(
    get,
    path = "/datasource/{id}",
    tag = "datasources",
    params(
        ("id" = String, Path, description = "Data source ID"),
        ("workspaceId" = String, Header, description = "Workspace UUID")
    ),
    responses(
        (status = 200, description = "Data source found", body = DataSourceRepresentation),
        (status = 400, description = "Invalid id or workspaceId", body = ErrorResponse),
        (status = 404, description = "Data source not found", body = ErrorResponse),
    )
)]
pub async fn get_data_source(
    State(state): State<AppState>,
    scope: WorkspaceScope,
    Path(id): Path<String>,
) -> ApiResult<Json<DataSourceRepresentation>> {
    let id = parse_id(&id)?;

    let data_source = state.data_sources.find_by_id(scope.context(), &id).await?;

    Ok(Json(data_source.into()))
}

/// Delete data source
#[utoipa::path(
    delete,
    path = "/datasource/{id}",
    tag = "datasources",
    params(
        ("id" = String, Path, description = "Data source ID"),
        ("workspaceId" = String, Header, description = "Workspace UUID")
    ),
    responses(
        (status = 204, description = "Data source deleted"),
        (status = 400, description = "Invalid id or workspaceId", body = ErrorResponse),
        (status = 404, description = "Data source not found", body = ErrorResponse),
        (status = 500, description = "Use-case failure", body = ErrorResponse),
    )
)]
pub async fn delete_data_source(
    State(state): State<AppState>,
    scope: WorkspaceScope,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let id = parse_id(&id)?;

    state.data_sources.delete(scope.context(), &id).await?;

    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_representation_shape() {
        let dto = DataSourceDto {
            id: "ds-1".to_string(),
            workspace_id: "ws-1".to_string(),
            name: "prometheus".to_string(),
            plugin_src: "prometheus".to_string(),
            health: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(DataSourceRepresentation::from(dto)).unwrap();

        assert_eq!(json["id"], "ds-1");
        assert_eq!(json["workspaceId"], "ws-1");
        assert_eq!(json["pluginSrc"], "prometheus");
        assert_eq!(json["health"], true);
        assert!(json["createdAt"].is_string());
        assert!(json.get("base").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateDataSourceApiRequest =
            serde_json::from_value(json!({ "name": "prom", "pluginSrc": "prometheus" })).unwrap();

        assert!(req.validate().is_ok());
        let request: CreateDataSourceRequest = req.into();
        assert!(!request.health);
        assert!(request.data.is_null());
    }

    #[test]
    fn test_create_request_length_rules() {
        let req: CreateDataSourceApiRequest = serde_json::from_value(json!({
            "name": "n".repeat(101),
            "pluginSrc": ""
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("plugin_src"));
    }

    #[test]
    fn test_parse_id() {
        let id = DataSourceId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("abc"), Err(ApiError::BadRequest(_))));
    }
}
