//! Test fixtures for generating data sources with realistic data.

use chrono::{Duration, Utc};
use compass_domain::{DataSource, WorkspaceId};
use fake::{faker::lorem::en::Word, Fake};
use serde_json::json;

use crate::builders::DataSourceBuilder;

/// Plugins a generated data source may point at
pub const TEST_PLUGINS: [&str; 3] = ["prometheus", "google-analytics", "datadog"];

/// Create a data source with a random name in the given workspace
pub fn create_test_data_source(workspace_id: WorkspaceId) -> DataSource {
    let word: String = Word().fake();
    let plugin = TEST_PLUGINS[(0..TEST_PLUGINS.len()).fake::<usize>()];

    DataSourceBuilder::new()
        .in_workspace(workspace_id)
        .with_name(format!("{}-{}", plugin, word))
        .with_plugin(plugin)
        .with_data(json!({ "url": format!("http://{}.internal", word) }))
        .build()
}

/// Create `count` data sources in one workspace with strictly increasing
/// creation times and distinct names
pub fn create_test_data_sources(workspace_id: WorkspaceId, count: usize) -> Vec<DataSource> {
    let base = Utc::now() - Duration::minutes(count as i64);

    (0..count)
        .map(|i| {
            DataSourceBuilder::new()
                .in_workspace(workspace_id)
                .with_name(format!("datasource-{:03}", i))
                .healthy(i % 2 == 0)
                .created_at(base + Duration::minutes(i as i64))
                .build()
        })
        .collect()
}
