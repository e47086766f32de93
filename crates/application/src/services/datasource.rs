//! Data Source Service
//!
//! Workspace-scoped listing, lookup, creation and deletion of data sources.

use super::ServiceContext;
use crate::validation::{CreateDataSourceRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use compass_domain::{DataSource, DataSourceError, DataSourceId, WorkspaceId};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Data source data transfer object
///
/// Connection settings stay behind the use-case boundary and are not part of
/// this type.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceDto {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub plugin_src: String,
    pub health: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&DataSource> for DataSourceDto {
    fn from(ds: &DataSource) -> Self {
        Self {
            id: ds.id.to_string(),
            workspace_id: ds.workspace_id.to_string(),
            name: ds.name.clone(),
            plugin_src: ds.plugin_src.clone(),
            health: ds.health,
            created_at: ds.created_at,
        }
    }
}

/// Data source use cases consumed by the HTTP layer
#[async_trait]
pub trait DataSourceUseCases: Send + Sync {
    /// All data sources of the context's workspace, in creation order
    async fn find_all_by_workspace(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<DataSourceDto>>;

    /// A single data source of the context's workspace
    async fn find_by_id(
        &self,
        ctx: &ServiceContext,
        id: &DataSourceId,
    ) -> ApplicationResult<DataSourceDto>;

    /// Remove a data source; `NotFound` when it does not exist in the workspace
    async fn delete(&self, ctx: &ServiceContext, id: &DataSourceId) -> ApplicationResult<()>;

    /// Register a new data source in the context's workspace
    async fn create(
        &self,
        _ctx: &ServiceContext,
        _request: CreateDataSourceRequest,
    ) -> ApplicationResult<DataSourceDto> {
        Err(ApplicationError::NotImplemented(
            "data source creation is not available".to_string(),
        ))
    }
}

/// Data source repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait DataSourceRepositoryPort: Send + Sync {
    async fn find_all_by_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<DataSource>, ApplicationError>;
    async fn find_by_id(
        &self,
        id: &DataSourceId,
        workspace_id: &WorkspaceId,
    ) -> Result<Option<DataSource>, ApplicationError>;
    async fn name_exists(
        &self,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<bool, ApplicationError>;
    async fn save(&self, data_source: &DataSource) -> Result<(), ApplicationError>;
    /// Returns whether a record was removed
    async fn delete(
        &self,
        id: &DataSourceId,
        workspace_id: &WorkspaceId,
    ) -> Result<bool, ApplicationError>;
}

/// Data source service implementation
pub struct DataSourceService<R>
where
    R: DataSourceRepositoryPort,
{
    repository: Arc<R>,
}

impl<R> DataSourceService<R>
where
    R: DataSourceRepositoryPort,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DataSourceUseCases for DataSourceService<R>
where
    R: DataSourceRepositoryPort,
{
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id, workspace_id = %ctx.workspace_id))]
    async fn find_all_by_workspace(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<DataSourceDto>> {
        let data_sources = self
            .repository
            .find_all_by_workspace(&ctx.workspace_id)
            .await?;

        debug!(count = data_sources.len(), "Listed data sources");

        Ok(data_sources.iter().map(DataSourceDto::from).collect())
    }

    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id, workspace_id = %ctx.workspace_id))]
    async fn find_by_id(
        &self,
        ctx: &ServiceContext,
        id: &DataSourceId,
    ) -> ApplicationResult<DataSourceDto> {
        self.repository
            .find_by_id(id, &ctx.workspace_id)
            .await?
            .map(|ds| DataSourceDto::from(&ds))
            .ok_or_else(|| DataSourceError::NotFound(*id).into())
    }

    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id, workspace_id = %ctx.workspace_id))]
    async fn delete(&self, ctx: &ServiceContext, id: &DataSourceId) -> ApplicationResult<()> {
        // Check data source exists in this workspace
        self.repository
            .find_by_id(id, &ctx.workspace_id)
            .await?
            .ok_or(DataSourceError::NotFound(*id))?;

        if !self.repository.delete(id, &ctx.workspace_id).await? {
            // Removed concurrently between lookup and delete
            return Err(DataSourceError::NotFound(*id).into());
        }

        info!(data_source_id = %id, "Data source deleted");

        Ok(())
    }

    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id, workspace_id = %ctx.workspace_id))]
    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateDataSourceRequest,
    ) -> ApplicationResult<DataSourceDto> {
        request.validate_all().ensure_valid()?;

        let data_source = DataSource::new(
            ctx.workspace_id,
            &request.name,
            &request.plugin_src,
            request.health,
            request.data,
        )?;

        // Check name uniqueness within the workspace
        if self
            .repository
            .name_exists(&ctx.workspace_id, &data_source.name)
            .await?
        {
            return Err(DataSourceError::DuplicateName(data_source.name).into());
        }

        self.repository.save(&data_source).await?;

        info!(
            data_source_id = %data_source.id,
            plugin_src = %data_source.plugin_src,
            "Data source created"
        );

        Ok(DataSourceDto::from(&data_source))
    }
}
