//! Fluent builder pattern for constructing test data.

use chrono::{DateTime, Utc};
use compass_application::CreateDataSourceRequest;
use compass_domain::{DataSource, DataSourceId, WorkspaceId};
use serde_json::json;

/// Builder for creating DataSource test instances
#[derive(Clone)]
pub struct DataSourceBuilder {
    id: DataSourceId,
    workspace_id: WorkspaceId,
    name: String,
    plugin_src: String,
    health: bool,
    data: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl DataSourceBuilder {
    pub fn new() -> Self {
        Self {
            id: DataSourceId::new(),
            workspace_id: WorkspaceId::new(),
            name: "prometheus-test".to_string(),
            plugin_src: "prometheus".to_string(),
            health: true,
            data: json!({ "url": "http://prometheus:9090" }),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: DataSourceId) -> Self {
        self.id = id;
        self
    }

    pub fn in_workspace(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = workspace_id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_plugin(mut self, plugin_src: impl Into<String>) -> Self {
        self.plugin_src = plugin_src.into();
        self
    }

    pub fn healthy(mut self, health: bool) -> Self {
        self.health = health;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build without running `DataSource::new` checks
    pub fn build(self) -> DataSource {
        DataSource {
            id: self.id,
            workspace_id: self.workspace_id,
            name: self.name,
            plugin_src: self.plugin_src,
            health: self.health,
            data: self.data,
            created_at: self.created_at,
        }
    }
}

impl Default for DataSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for create requests
#[derive(Clone)]
pub struct CreateDataSourceRequestBuilder {
    request: CreateDataSourceRequest,
}

impl CreateDataSourceRequestBuilder {
    pub fn new() -> Self {
        let mut request = CreateDataSourceRequest::new("prometheus-test", "prometheus");
        request.data = json!({ "url": "http://prometheus:9090" });
        Self { request }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn with_plugin(mut self, plugin_src: impl Into<String>) -> Self {
        self.request.plugin_src = plugin_src.into();
        self
    }

    pub fn healthy(mut self, health: bool) -> Self {
        self.request.health = health;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.request.data = data;
        self
    }

    pub fn build(self) -> CreateDataSourceRequest {
        self.request
    }
}

impl Default for CreateDataSourceRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
