//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use async_trait::async_trait;
use compass_application::{
    ApplicationError, DataSourceRepositoryPort, DataSourceService, DataSourceUseCases,
};
use compass_domain::{DataSource, DataSourceId, WorkspaceId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Data source use cases (type-erased)
    pub data_sources: Arc<dyn DataSourceUseCases>,
}

impl AppState {
    /// Create a new application state backed by the in-memory repository
    pub fn new(config: ApiConfig) -> Self {
        let repository = Arc::new(InMemoryDataSourceRepository::new());
        let service = DataSourceService::new(repository);

        Self::with_use_cases(config, Arc::new(service))
    }

    /// Create application state around an existing use-case implementation
    pub fn with_use_cases(config: ApiConfig, data_sources: Arc<dyn DataSourceUseCases>) -> Self {
        Self {
            config: Arc::new(config),
            data_sources,
        }
    }
}

/// In-memory data source repository
///
/// Keeps records in insertion order, which is also creation order.
#[derive(Default)]
pub struct InMemoryDataSourceRepository {
    data_sources: RwLock<Vec<DataSource>>,
}

impl InMemoryDataSourceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSourceRepositoryPort for InMemoryDataSourceRepository {
    async fn find_all_by_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<DataSource>, ApplicationError> {
        Ok(self
            .data_sources
            .read()
            .iter()
            .filter(|ds| ds.belongs_to(workspace_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &DataSourceId,
        workspace_id: &WorkspaceId,
    ) -> Result<Option<DataSource>, ApplicationError> {
        Ok(self
            .data_sources
            .read()
            .iter()
            .find(|ds| &ds.id == id && ds.belongs_to(workspace_id))
            .cloned())
    }

    async fn name_exists(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<bool, ApplicationError> {
        Ok(self
            .data_sources
            .read()
            .iter()
            .any(|ds| ds.belongs_to(workspace_id) && ds.has_name(name)))
    }

    async fn save(&self, data_source: &DataSource) -> Result<(), ApplicationError> {
        let mut data_sources = self.data_sources.write();

        if data_sources.iter().any(|ds| ds.id == data_source.id) {
            return Err(ApplicationError::Conflict(format!(
                "Data source already exists: {}",
                data_source.id
            )));
        }

        data_sources.push(data_source.clone());
        Ok(())
    }

    async fn delete(
        &self,
        id: &DataSourceId,
        workspace_id: &WorkspaceId,
    ) -> Result<bool, ApplicationError> {
        let mut data_sources = self.data_sources.write();
        let before = data_sources.len();
        data_sources.retain(|ds| !(&ds.id == id && ds.belongs_to(workspace_id)));
        Ok(data_sources.len() < before)
    }
}
