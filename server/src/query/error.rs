//! Query language errors

use serde_json::Value;
use thiserror::Error;

/// Shape violation reported by an operator validator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("expected {0}")]
    Expected(&'static str),

    #[error("unknown geometry type: {0}")]
    UnknownGeometry(String),

    #[error("malformed coordinates for {kind}: {reason}")]
    Coordinates { kind: &'static str, reason: String },
}

/// Error raised while compiling a filter document
///
/// The message is what clients see in the field-scoped 400 response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid {op} condition: {value}")]
    InvalidCondition { op: String, value: Value },

    #[error("Filter exceeds maximum nesting depth of {max_depth}")]
    TooDeep { max_depth: usize },
}

impl QueryError {
    pub fn invalid(op: impl Into<String>, value: &Value) -> Self {
        Self::InvalidCondition {
            op: op.into(),
            value: value.clone(),
        }
    }

    /// Operator the error refers to, if any
    pub fn op(&self) -> Option<&str> {
        match self {
            Self::InvalidCondition { op, .. } => Some(op),
            Self::TooDeep { .. } => None,
        }
    }
}
