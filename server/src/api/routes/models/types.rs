//! Models API types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::api::types::validate_field_names;
use crate::query::Resource;

/// Model description with its current filterable fields
#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub table: String,
    pub fields: Vec<String>,
    pub filterable: Vec<String>,
}

impl From<&Resource> for ModelSummary {
    fn from(resource: &Resource) -> Self {
        let model = resource.model();
        Self {
            name: model.name.clone(),
            table: model.table.clone(),
            fields: model.fields.clone(),
            filterable: resource.acceptance().snapshot().sorted(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub data: Vec<ModelSummary>,
}

/// Compiled query for a filter
#[derive(Debug, Serialize)]
pub struct QueryPreviewResponse {
    pub model: String,
    pub dialect: String,
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub fields: Vec<String>,
    pub filterable: Vec<String>,
}

impl From<&Resource> for FieldsResponse {
    fn from(resource: &Resource) -> Self {
        Self {
            fields: resource.model().fields.clone(),
            filterable: resource.acceptance().snapshot().sorted(),
        }
    }
}

/// Request body replacing a model's filterable fields
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFilterableRequest {
    #[validate(custom(function = "validate_field_names"))]
    pub filterable: Vec<String>,
}
