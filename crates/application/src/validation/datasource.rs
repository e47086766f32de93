//! Data source validation rules

use super::{Validatable, ValidationResult, ValidationRules};
use compass_domain::DataSource;
use serde::{Deserialize, Serialize};

/// Create data source request validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDataSourceRequest {
    pub name: String,
    pub plugin_src: String,
    pub health: bool,
    pub data: serde_json::Value,
}

impl CreateDataSourceRequest {
    pub fn new(name: impl Into<String>, plugin_src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin_src: plugin_src.into(),
            health: false,
            data: serde_json::Value::Null,
        }
    }
}

impl Validatable for CreateDataSourceRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        result.merge(ValidationRules::validate_required_text(
            &self.name,
            "name",
            DataSource::MAX_NAME_LENGTH,
        ));

        result.merge(ValidationRules::validate_required_text(
            &self.plugin_src,
            "pluginSrc",
            DataSource::MAX_PLUGIN_SRC_LENGTH,
        ));

        if !(self.data.is_object() || self.data.is_null()) {
            result.add_field_error("data", "must be a JSON object");
        }

        result
    }
}
