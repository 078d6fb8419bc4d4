//! Request-time filter stage
//!
//! Reads the filter parameter from the query string, compiles it against the
//! resource's accepted fields and narrows the inbound [`DbSet`]. Failures are
//! reported as a 400 keyed on the parameter name:
//!
//! ```json
//! {"errors": {"where": "invalid value"}}
//! ```

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use super::compiler::parse_conditions;
use super::resource::Resource;
use crate::data::dbset::DbSet;

/// Message for filters that are not a JSON object
pub const INVALID_VALUE: &str = "invalid value";

/// Field-scoped filter error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRejection {
    param: String,
    message: String,
}

impl FilterRejection {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }

    fn invalid_value(param: &str) -> Self {
        Self::new(param, INVALID_VALUE)
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for FilterRejection {
    fn into_response(self) -> Response {
        let mut errors = Map::with_capacity(1);
        errors.insert(self.param, Value::String(self.message));
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "errors": errors })),
        )
            .into_response()
    }
}

#[derive(Debug, Clone)]
pub struct QueryFilterStage {
    param: String,
    max_depth: usize,
    max_filter_bytes: usize,
}

impl QueryFilterStage {
    pub fn new(param: impl Into<String>, max_depth: usize, max_filter_bytes: usize) -> Self {
        Self {
            param: param.into(),
            max_depth,
            max_filter_bytes,
        }
    }

    /// Query parameter carrying the filter
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Narrow `dbset` with the filter found in `params`, if any
    pub fn apply(
        &self,
        resource: &Resource,
        params: &HashMap<String, String>,
        dbset: DbSet,
    ) -> Result<DbSet, FilterRejection> {
        let raw = match params.get(&self.param) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(dbset),
        };

        let allowed = resource.acceptance().snapshot();
        if allowed.is_empty() {
            return Ok(dbset);
        }

        if raw.len() > self.max_filter_bytes {
            tracing::debug!(
                param = %self.param,
                size = raw.len(),
                limit = self.max_filter_bytes,
                "Filter parameter too large"
            );
            return Err(FilterRejection::invalid_value(&self.param));
        }

        let doc = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(doc)) => doc,
            Ok(_) => {
                tracing::debug!(param = %self.param, "Filter is not a JSON object");
                return Err(FilterRejection::invalid_value(&self.param));
            }
            Err(e) => {
                tracing::debug!(param = %self.param, error = %e, "Filter is not valid JSON");
                return Err(FilterRejection::invalid_value(&self.param));
            }
        };

        parse_conditions(resource.model(), dbset, &doc, &allowed, self.max_depth).map_err(|e| {
            tracing::debug!(
                model = %resource.model().name,
                param = %self.param,
                error = %e,
                "Rejected filter"
            );
            FilterRejection::new(&self.param, e.to_string())
        })
    }
}
