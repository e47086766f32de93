//! Data source entity for the Compass domain.
//!
//! A data source is a metrics backend (Prometheus, Google Analytics, ...)
//! registered inside a workspace. The `plugin_src` names the plugin that
//! knows how to talk to it, and `data` carries the plugin-specific connection
//! settings.

use crate::errors::DataSourceError;
use crate::identifiers::{DataSourceId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A data source registered in a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Unique identifier
    pub id: DataSourceId,

    /// Workspace that owns this data source
    pub workspace_id: WorkspaceId,

    /// Human-readable name, unique within the workspace
    pub name: String,

    /// Plugin that implements the connection
    pub plugin_src: String,

    /// Whether the data source answered its last health probe
    pub health: bool,

    /// Plugin connection settings
    pub data: serde_json::Value,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl DataSource {
    /// Maximum length of a data source name, in characters
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Maximum length of a plugin source reference, in characters
    pub const MAX_PLUGIN_SRC_LENGTH: usize = 255;

    /// Create a new data source owned by `workspace_id`.
    ///
    /// The name is trimmed before it is stored.
    pub fn new(
        workspace_id: WorkspaceId,
        name: impl AsRef<str>,
        plugin_src: impl AsRef<str>,
        health: bool,
        data: serde_json::Value,
    ) -> Result<Self, DataSourceError> {
        let name = Self::normalize_name(name.as_ref())?;

        let plugin_src = plugin_src.as_ref().trim();
        if plugin_src.is_empty() || plugin_src.chars().count() > Self::MAX_PLUGIN_SRC_LENGTH {
            return Err(DataSourceError::InvalidPluginSrc(plugin_src.to_string()));
        }

        if !(data.is_object() || data.is_null()) {
            return Err(DataSourceError::InvalidDefinition(
                "connection data must be a JSON object".to_string(),
            ));
        }

        Ok(Self {
            id: DataSourceId::new(),
            workspace_id,
            name,
            plugin_src: plugin_src.to_string(),
            health,
            data,
            created_at: Utc::now(),
        })
    }

    /// Trim and check a candidate name
    pub fn normalize_name(name: &str) -> Result<String, DataSourceError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(DataSourceError::InvalidName(name.to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Whether this data source belongs to the given workspace
    pub fn belongs_to(&self, workspace_id: &WorkspaceId) -> bool {
        &self.workspace_id == workspace_id
    }

    /// Case-insensitive name comparison, used for uniqueness checks
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
