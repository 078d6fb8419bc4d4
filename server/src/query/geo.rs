//! Geometry literal decoding
//!
//! Filters carry geometries as GeoJSON-like objects:
//! `{"type": "point", "coordinates": [1, 2]}`. Proximity operators wrap them as
//! `{"geometry": {...}, "distance": 10}`.

use serde_json::{Map, Value};

use super::error::ShapeError;
use crate::data::geometry::{Geometry, Position};

/// Minimum positions in a closed polygon ring
const MIN_RING_POSITIONS: usize = 4;

fn exact_keys<'a>(
    value: &'a Value,
    keys: [&str; 2],
    expected: &'static str,
) -> Result<&'a Map<String, Value>, ShapeError> {
    let obj = value.as_object().ok_or(ShapeError::Expected(expected))?;
    if obj.len() != keys.len() || !keys.iter().all(|k| obj.contains_key(*k)) {
        return Err(ShapeError::Expected(expected));
    }
    Ok(obj)
}

fn coords_error(kind: &'static str, reason: impl Into<String>) -> ShapeError {
    ShapeError::Coordinates {
        kind,
        reason: reason.into(),
    }
}

fn position(value: &Value, kind: &'static str) -> Result<Position, ShapeError> {
    let items = value
        .as_array()
        .ok_or_else(|| coords_error(kind, "position must be a list"))?;
    match items.as_slice() {
        [x, y] => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Position::new(x, y)),
            _ => Err(coords_error(kind, "position values must be numbers")),
        },
        _ => Err(coords_error(kind, "position must have exactly 2 values")),
    }
}

fn positions(value: &Value, kind: &'static str) -> Result<Vec<Position>, ShapeError> {
    value
        .as_array()
        .ok_or_else(|| coords_error(kind, "expected a list of positions"))?
        .iter()
        .map(|p| position(p, kind))
        .collect()
}

fn line(value: &Value) -> Result<Vec<Position>, ShapeError> {
    let points = positions(value, "linestring")?;
    if points.len() < 2 {
        return Err(coords_error("linestring", "needs at least 2 positions"));
    }
    Ok(points)
}

fn ring(value: &Value) -> Result<Vec<Position>, ShapeError> {
    let points = positions(value, "polygon")?;
    if points.len() < MIN_RING_POSITIONS {
        return Err(coords_error(
            "polygon",
            format!("ring needs at least {} positions", MIN_RING_POSITIONS),
        ));
    }
    if points.first() != points.last() {
        return Err(coords_error("polygon", "ring must be closed"));
    }
    Ok(points)
}

/// Accepts a single ring or a list of rings (outer ring first)
fn polygon(value: &Value) -> Result<Vec<Vec<Position>>, ShapeError> {
    let items = value
        .as_array()
        .filter(|items| !items.is_empty())
        .ok_or_else(|| coords_error("polygon", "expected a non-empty list"))?;

    let single_ring = items[0]
        .as_array()
        .and_then(|first| first.first())
        .is_some_and(Value::is_number);

    if single_ring {
        Ok(vec![ring(value)?])
    } else {
        items.iter().map(ring).collect()
    }
}

/// Decode a `{type, coordinates}` geometry literal
pub fn decode_geometry(value: &Value) -> Result<Geometry, ShapeError> {
    let obj = exact_keys(
        value,
        ["type", "coordinates"],
        "object with keys type and coordinates",
    )?;
    let kind = obj["type"]
        .as_str()
        .ok_or(ShapeError::Expected("geometry type string"))?;
    let coordinates = &obj["coordinates"];

    match kind.to_ascii_lowercase().as_str() {
        "point" => Ok(Geometry::Point(position(coordinates, "point")?)),
        "line" | "linestring" => Ok(Geometry::Line(line(coordinates)?)),
        "polygon" => Ok(Geometry::Polygon(polygon(coordinates)?)),
        _ => Err(ShapeError::UnknownGeometry(kind.to_string())),
    }
}

/// Decode a `{geometry, distance}` proximity literal
pub fn decode_proximity(value: &Value) -> Result<(Geometry, f64), ShapeError> {
    let obj = exact_keys(
        value,
        ["geometry", "distance"],
        "object with keys geometry and distance",
    )?;
    let distance = obj["distance"]
        .as_f64()
        .filter(|d| *d != 0.0)
        .ok_or(ShapeError::Expected("nonzero numeric distance"))?;
    let geometry = decode_geometry(&obj["geometry"])?;
    Ok((geometry, distance))
}
