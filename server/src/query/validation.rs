//! Operator value validation
//!
//! Each operator has a pure validator checking the shape of its value and
//! converting it into an [`Operand`] its builder can consume.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use super::error::ShapeError;
use super::geo::{decode_geometry, decode_proximity};
use crate::data::geometry::Geometry;

/// Validated operator value
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    List(Vec<Value>),
    Flag(bool),
    Document(Map<String, Value>),
    Documents(Vec<Map<String, Value>>),
    Geometry(Geometry),
    Proximity(Geometry, f64),
}

pub type Validator = fn(&Value) -> Result<Operand, ShapeError>;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Whether a string reads as an ISO 8601 datetime or date
pub fn is_iso_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Any value, unchanged
pub fn validate_default(v: &Value) -> Result<Operand, ShapeError> {
    Ok(Operand::Value(v.clone()))
}

/// List of sub-documents for `$and` / `$or`
pub fn validate_glue(v: &Value) -> Result<Operand, ShapeError> {
    let items = v
        .as_array()
        .ok_or(ShapeError::Expected("list of objects"))?;
    items
        .iter()
        .map(|item| {
            item.as_object()
                .cloned()
                .ok_or(ShapeError::Expected("list of objects"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Operand::Documents)
}

pub fn validate_document(v: &Value) -> Result<Operand, ShapeError> {
    v.as_object()
        .cloned()
        .map(Operand::Document)
        .ok_or(ShapeError::Expected("object"))
}

pub fn validate_list(v: &Value) -> Result<Operand, ShapeError> {
    v.as_array()
        .cloned()
        .map(Operand::List)
        .ok_or(ShapeError::Expected("list"))
}

/// Number or ISO datetime string for ordering comparisons
pub fn validate_ordering(v: &Value) -> Result<Operand, ShapeError> {
    match v {
        Value::Number(_) => Ok(Operand::Value(v.clone())),
        Value::String(s) if is_iso_datetime(s) => Ok(Operand::Value(v.clone())),
        _ => Err(ShapeError::Expected("number or ISO 8601 datetime")),
    }
}

pub fn validate_flag(v: &Value) -> Result<Operand, ShapeError> {
    v.as_bool()
        .map(Operand::Flag)
        .ok_or(ShapeError::Expected("boolean"))
}

pub fn validate_geo(v: &Value) -> Result<Operand, ShapeError> {
    decode_geometry(v).map(Operand::Geometry)
}

pub fn validate_geo_dwithin(v: &Value) -> Result<Operand, ShapeError> {
    decode_proximity(v).map(|(geometry, distance)| Operand::Proximity(geometry, distance))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn glue_requires_list_of_objects() {
        assert!(validate_glue(&json!([{"a": 1}, {}])).is_ok());
        assert!(validate_glue(&json!({"a": 1})).is_err());
        assert!(validate_glue(&json!([{"a": 1}, 2])).is_err());
    }

    #[test]
    fn glue_accepts_empty_list() {
        assert_eq!(validate_glue(&json!([])), Ok(Operand::Documents(vec![])));
    }

    #[test]
    fn document_requires_object() {
        assert!(validate_document(&json!({"int": 1})).is_ok());
        assert!(validate_document(&json!([1])).is_err());
    }

    #[test]
    fn list_requires_array() {
        assert_eq!(
            validate_list(&json!([4, 5])),
            Ok(Operand::List(vec![json!(4), json!(5)]))
        );
        assert!(validate_list(&json!("not-a-list")).is_err());
    }

    #[test]
    fn ordering_accepts_numbers_and_datetimes() {
        assert!(validate_ordering(&json!(3)).is_ok());
        assert!(validate_ordering(&json!(2.5)).is_ok());
        assert!(validate_ordering(&json!("2024-01-01T00:00:00Z")).is_ok());
        assert!(validate_ordering(&json!("2024-01-01T10:30:00.123")).is_ok());
        assert!(validate_ordering(&json!("2024-01-01 10:30:00")).is_ok());
        assert!(validate_ordering(&json!("2024-01-01")).is_ok());
    }

    #[test]
    fn ordering_rejects_other_values() {
        assert!(validate_ordering(&json!("tomorrow")).is_err());
        assert!(validate_ordering(&json!(true)).is_err());
        assert!(validate_ordering(&json!(null)).is_err());
        assert!(validate_ordering(&json!([1])).is_err());
    }

    #[test]
    fn flag_requires_boolean() {
        assert_eq!(validate_flag(&json!(true)), Ok(Operand::Flag(true)));
        assert!(validate_flag(&json!("yes")).is_err());
        assert!(validate_flag(&json!(1)).is_err());
    }

    #[test]
    fn default_passes_anything_through() {
        for v in [json!(null), json!("x"), json!([1]), json!({"a": 1})] {
            assert_eq!(validate_default(&v), Ok(Operand::Value(v.clone())));
        }
    }
}
