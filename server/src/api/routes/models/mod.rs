//! Models API endpoints
//!
//! Lists configured models, previews the SQL a filter compiles to and
//! replaces a model's filterable fields.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use types::{
    FieldsResponse, ListModelsResponse, ModelSummary, QueryPreviewResponse,
    UpdateFilterableRequest,
};

use crate::api::extractors::{ModelPath, QueryParams, ValidatedJson};
use crate::api::types::ApiError;
use crate::core::config::QueryConfig;
use crate::core::registry::ModelRegistry;
use crate::data::sql::Backend;
use crate::query::{QueryFilterStage, Resource};

/// Shared state for Models API endpoints
#[derive(Clone)]
pub struct ModelsApiState {
    pub registry: Arc<ModelRegistry>,
    pub stage: QueryFilterStage,
    pub dialect: Backend,
}

impl ModelsApiState {
    fn resource(&self, name: &str) -> Result<Arc<Resource>, ApiError> {
        self.registry
            .get(name)
            .ok_or_else(|| ApiError::model_not_found(name))
    }
}

/// Build Models API routes
pub fn routes(registry: Arc<ModelRegistry>, query: &QueryConfig) -> Router<()> {
    let state = ModelsApiState {
        registry,
        stage: QueryFilterStage::new(&query.param, query.max_depth, query.max_filter_bytes),
        dialect: query.dialect,
    };

    Router::new()
        .route("/", get(list_models))
        .route("/{model}/query", get(query_model))
        .route("/{model}/fields", get(get_fields).put(update_fields))
        .with_state(state)
}

/// List configured models
pub async fn list_models(State(state): State<ModelsApiState>) -> Json<ListModelsResponse> {
    let data = state
        .registry
        .iter()
        .map(|resource| ModelSummary::from(resource.as_ref()))
        .collect();
    Json(ListModelsResponse { data })
}

/// Apply the request's filter to the model and render the resulting query
pub async fn query_model(
    State(state): State<ModelsApiState>,
    path: ModelPath,
    QueryParams(params): QueryParams,
) -> Result<Json<QueryPreviewResponse>, Response> {
    let resource = state
        .resource(&path.model)
        .map_err(IntoResponse::into_response)?;

    let dbset = state
        .stage
        .apply(&resource, &params, resource.dbset())
        .map_err(IntoResponse::into_response)?;

    let (sql, sql_params) = dbset.to_sql(state.dialect.dialect());
    tracing::debug!(model = %path.model, sql = %sql, "Compiled query");

    Ok(Json(QueryPreviewResponse {
        model: path.model,
        dialect: state.dialect.name().to_string(),
        sql,
        params: sql_params.values,
    }))
}

/// Get a model's fields and its filterable subset
pub async fn get_fields(
    State(state): State<ModelsApiState>,
    path: ModelPath,
) -> Result<Json<FieldsResponse>, ApiError> {
    let resource = state.resource(&path.model)?;
    Ok(Json(FieldsResponse::from(resource.as_ref())))
}

/// Replace a model's filterable fields
pub async fn update_fields(
    State(state): State<ModelsApiState>,
    path: ModelPath,
    ValidatedJson(body): ValidatedJson<UpdateFilterableRequest>,
) -> Result<Json<FieldsResponse>, ApiError> {
    let resource = state.resource(&path.model)?;
    resource
        .set_filterable(body.filterable)
        .map_err(ApiError::from_field_set)?;

    tracing::info!(
        model = %path.model,
        count = resource.acceptance().snapshot().len(),
        "Filterable fields updated"
    );
    Ok(Json(FieldsResponse::from(resource.as_ref())))
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
