//! Shared API types
//!
//! Error responses and request validators used across endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationError;

use crate::core::constants::{MAX_FILTERABLE_FIELDS, MAX_NAME_LENGTH};
use crate::query::FieldSetError;

/// Validate a model or field name: 1-64 chars, alphanumeric + dash/underscore
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Validator function for filterable field lists
pub fn validate_field_names<T: AsRef<[String]>>(names: T) -> Result<(), ValidationError> {
    let names = names.as_ref();
    if names.len() > MAX_FILTERABLE_FIELDS {
        return Err(ValidationError::new("fields_too_many").with_message(
            format!("Cannot accept more than {} fields", MAX_FILTERABLE_FIELDS).into(),
        ));
    }
    for name in names {
        if !is_valid_name(name) {
            return Err(ValidationError::new("field_name").with_message(
                format!(
                    "Invalid field name {:?}: must be 1-{} alphanumeric chars, dashes, or underscores",
                    name, MAX_NAME_LENGTH
                )
                .into(),
            ));
        }
    }
    Ok(())
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn model_not_found(name: &str) -> Self {
        Self::not_found("MODEL_NOT_FOUND", format!("Model not found: {}", name))
    }

    pub fn from_field_set(e: FieldSetError) -> Self {
        tracing::debug!(error = %e, "Rejected field set");
        Self::bad_request("UNKNOWN_FIELD", e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("samples"));
        assert!(is_valid_name("created_at"));
        assert!(is_valid_name("geo-point"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("$and"));
        assert!(!is_valid_name(&"x".repeat(MAX_NAME_LENGTH + 1)));
    }

    #[test]
    fn test_validate_field_names() {
        assert!(validate_field_names(vec!["a".to_string(), "b_c".to_string()]).is_ok());
        assert!(validate_field_names(Vec::<String>::new()).is_ok());
        assert!(validate_field_names(vec!["bad name".to_string()]).is_err());

        let too_many: Vec<String> = (0..=MAX_FILTERABLE_FIELDS).map(|i| format!("f{}", i)).collect();
        let err = validate_field_names(too_many).unwrap_err();
        assert_eq!(err.code, "fields_too_many");
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::model_not_found("nope").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::bad_request("X", "y").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
