//! Mock implementations for repositories and use cases.
//!
//! Provides in-memory mocks for testing without database dependencies. Both
//! mocks record every call so tests can assert on side effects (or their
//! absence).

use async_trait::async_trait;
use compass_application::{
    ApplicationError, ApplicationResult, CreateDataSourceRequest, DataSourceDto,
    DataSourceRepositoryPort, DataSourceUseCases, ServiceContext,
};
use compass_domain::{DataSource, DataSourceError, DataSourceId, WorkspaceId};
use parking_lot::RwLock;
use std::sync::Arc;

/// A call observed by one of the mocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FindAllByWorkspace { workspace_id: WorkspaceId },
    FindById { id: DataSourceId, workspace_id: WorkspaceId },
    NameExists { workspace_id: WorkspaceId, name: String },
    Save { id: DataSourceId, workspace_id: WorkspaceId },
    Create { workspace_id: WorkspaceId, name: String },
    Delete { id: DataSourceId, workspace_id: WorkspaceId },
}

impl RecordedCall {
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

/// Shared call log
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl CallLog {
    pub fn record(&self, call: RecordedCall) {
        self.calls.write().push(call);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().clone()
    }

    pub fn delete_count(&self) -> usize {
        self.calls.read().iter().filter(|c| c.is_delete()).count()
    }

    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }

    pub fn clear(&self) {
        self.calls.write().clear();
    }
}

/// Mock data source repository for testing services
pub struct MockDataSourceRepository {
    data_sources: Arc<RwLock<Vec<DataSource>>>,
    failure: Arc<RwLock<Option<ApplicationError>>>,
    pub log: CallLog,
}

impl MockDataSourceRepository {
    pub fn new() -> Self {
        Self {
            data_sources: Arc::new(RwLock::new(Vec::new())),
            failure: Arc::new(RwLock::new(None)),
            log: CallLog::default(),
        }
    }

    /// Seed the repository
    pub fn with_data_sources(data_sources: impl IntoIterator<Item = DataSource>) -> Self {
        let repo = Self::new();
        repo.data_sources.write().extend(data_sources);
        repo
    }

    /// Make every subsequent call fail with `err`
    pub fn fail_with(&self, err: ApplicationError) {
        *self.failure.write() = Some(err);
    }

    pub fn count(&self) -> usize {
        self.data_sources.read().len()
    }

    pub fn contains(&self, id: &DataSourceId) -> bool {
        self.data_sources.read().iter().any(|ds| &ds.id == id)
    }

    fn check_failure(&self) -> Result<(), ApplicationError> {
        match self.failure.read().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockDataSourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSourceRepositoryPort for MockDataSourceRepository {
    async fn find_all_by_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<DataSource>, ApplicationError> {
        self.log.record(RecordedCall::FindAllByWorkspace {
            workspace_id: *workspace_id,
        });
        self.check_failure()?;

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
        self.log.record(RecordedCall::FindById {
            id: *id,
            workspace_id: *workspace_id,
        });
        self.check_failure()?;

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
        self.log.record(RecordedCall::NameExists {
            workspace_id: *workspace_id,
            name: name.to_string(),
        });
        self.check_failure()?;

        Ok(self
            .data_sources
            .read()
            .iter()
            .any(|ds| ds.belongs_to(workspace_id) && ds.has_name(name)))
    }

    async fn save(&self, data_source: &DataSource) -> Result<(), ApplicationError> {
        self.log.record(RecordedCall::Save {
            id: data_source.id,
            workspace_id: data_source.workspace_id,
        });
        self.check_failure()?;

        self.data_sources.write().push(data_source.clone());
        Ok(())
    }

    async fn delete(
        &self,
        id: &DataSourceId,
        workspace_id: &WorkspaceId,
    ) -> Result<bool, ApplicationError> {
        self.log.record(RecordedCall::Delete {
            id: *id,
            workspace_id: *workspace_id,
        });
        self.check_failure()?;

        let mut data_sources = self.data_sources.write();
        let before = data_sources.len();
        data_sources.retain(|ds| !(&ds.id == id && ds.belongs_to(workspace_id)));
        Ok(data_sources.len() < before)
    }
}

/// Mock data source use cases for testing the HTTP layer
pub struct MockDataSourceUseCases {
    data_sources: Arc<RwLock<Vec<DataSource>>>,
    failure: Arc<RwLock<Option<ApplicationError>>>,
    pub log: CallLog,
}

impl MockDataSourceUseCases {
    pub fn new() -> Self {
        Self {
            data_sources: Arc::new(RwLock::new(Vec::new())),
            failure: Arc::new(RwLock::new(None)),
            log: CallLog::default(),
        }
    }

    /// Seed the use cases
    pub fn with_data_sources(data_sources: impl IntoIterator<Item = DataSource>) -> Self {
        let mock = Self::new();
        mock.data_sources.write().extend(data_sources);
        mock
    }

    /// Make every subsequent call fail with `err`
    pub fn fail_with(&self, err: ApplicationError) {
        *self.failure.write() = Some(err);
    }

    pub fn count(&self) -> usize {
        self.data_sources.read().len()
    }

    pub fn contains(&self, id: &DataSourceId) -> bool {
        self.data_sources.read().iter().any(|ds| &ds.id == id)
    }

    fn check_failure(&self) -> ApplicationResult<()> {
        match self.failure.read().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockDataSourceUseCases {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSourceUseCases for MockDataSourceUseCases {
    async fn find_all_by_workspace(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<DataSourceDto>> {
        self.log.record(RecordedCall::FindAllByWorkspace {
            workspace_id: ctx.workspace_id,
        });
        self.check_failure()?;

        Ok(self
            .data_sources
            .read()
            .iter()
            .filter(|ds| ds.belongs_to(&ctx.workspace_id))
            .map(DataSourceDto::from)
            .collect())
    }

    async fn find_by_id(
        &self,
        ctx: &ServiceContext,
        id: &DataSourceId,
    ) -> ApplicationResult<DataSourceDto> {
        self.log.record(RecordedCall::FindById {
            id: *id,
            workspace_id: ctx.workspace_id,
        });
        self.check_failure()?;

        self.data_sources
            .read()
            .iter()
            .find(|ds| &ds.id == id && ds.belongs_to(&ctx.workspace_id))
            .map(DataSourceDto::from)
            .ok_or_else(|| DataSourceError::NotFound(*id).into())
    }

    async fn delete(&self, ctx: &ServiceContext, id: &DataSourceId) -> ApplicationResult<()> {
        self.log.record(RecordedCall::Delete {
            id: *id,
            workspace_id: ctx.workspace_id,
        });
        self.check_failure()?;

        let mut data_sources = self.data_sources.write();
        let before = data_sources.len();
        data_sources.retain(|ds| !(&ds.id == id && ds.belongs_to(&ctx.workspace_id)));

        if data_sources.len() == before {
            return Err(DataSourceError::NotFound(*id).into());
        }
        Ok(())
    }

    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateDataSourceRequest,
    ) -> ApplicationResult<DataSourceDto> {
        self.log.record(RecordedCall::Create {
            workspace_id: ctx.workspace_id,
            name: request.name.clone(),
        });
        self.check_failure()?;

        let data_source = DataSource::new(
            ctx.workspace_id,
            &request.name,
            &request.plugin_src,
            request.health,
            request.data,
        )?;
        let dto = DataSourceDto::from(&data_source);
        self.data_sources.write().push(data_source);
        Ok(dto)
    }
}

/// Use cases without a create operation
///
/// Delegates reads and deletes to a [`MockDataSourceUseCases`] and leaves
/// `create` at the trait default.
pub struct ReadOnlyDataSourceUseCases {
    pub inner: Arc<MockDataSourceUseCases>,
}

impl ReadOnlyDataSourceUseCases {
    pub fn new(inner: Arc<MockDataSourceUseCases>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DataSourceUseCases for ReadOnlyDataSourceUseCases {
    async fn find_all_by_workspace(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<DataSourceDto>> {
        self.inner.find_all_by_workspace(ctx).await
    }

    async fn find_by_id(
        &self,
        ctx: &ServiceContext,
        id: &DataSourceId,
    ) -> ApplicationResult<DataSourceDto> {
        self.inner.find_by_id(ctx, id).await
    }

    async fn delete(&self, ctx: &ServiceContext, id: &DataSourceId) -> ApplicationResult<()> {
        self.inner.delete(ctx, id).await
    }
}
