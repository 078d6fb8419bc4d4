//! Model and field handles
//!
//! A model describes the columns a resource exposes. Field handles are the
//! entry point for building predicates against a single column.

use serde::Serialize;
use serde_json::Value;

use super::geometry::Geometry;
use super::predicate::{Comparison, PatternKind, Predicate, SpatialRelation};

/// Resource model: a table and the columns it exposes
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub name: String,
    pub table: String,
    pub fields: Vec<String>,
}

impl Model {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve a field handle by name
    pub fn field(&self, name: &str) -> Option<Field> {
        self.has_field(name).then(|| Field::new(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }
}

/// Handle to a single model column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn compare(&self, op: Comparison, value: Value) -> Predicate {
        Predicate::Compare {
            field: self.clone(),
            op,
            value,
        }
    }

    pub fn eq(&self, value: Value) -> Predicate {
        self.compare(Comparison::Eq, value)
    }

    pub fn ne(&self, value: Value) -> Predicate {
        self.compare(Comparison::Ne, value)
    }

    pub fn lt(&self, value: Value) -> Predicate {
        self.compare(Comparison::Lt, value)
    }

    pub fn gt(&self, value: Value) -> Predicate {
        self.compare(Comparison::Gt, value)
    }

    pub fn le(&self, value: Value) -> Predicate {
        self.compare(Comparison::Le, value)
    }

    pub fn ge(&self, value: Value) -> Predicate {
        self.compare(Comparison::Ge, value)
    }

    /// Membership test (`IN`)
    pub fn belongs(&self, values: Vec<Value>) -> Predicate {
        Predicate::Belongs {
            field: self.clone(),
            values,
        }
    }

    fn pattern(&self, kind: PatternKind, pattern: Value, case_sensitive: bool) -> Predicate {
        Predicate::Pattern {
            field: self.clone(),
            kind,
            pattern,
            case_sensitive,
        }
    }

    /// Substring match
    pub fn contains(&self, needle: Value, case_sensitive: bool) -> Predicate {
        self.pattern(PatternKind::Contains, needle, case_sensitive)
    }

    /// SQL LIKE pattern match (pattern used verbatim)
    pub fn like(&self, pattern: Value, case_sensitive: bool) -> Predicate {
        self.pattern(PatternKind::Like, pattern, case_sensitive)
    }

    pub fn regex(&self, pattern: Value, case_sensitive: bool) -> Predicate {
        self.pattern(PatternKind::Regex, pattern, case_sensitive)
    }

    pub fn spatial(&self, relation: SpatialRelation, geometry: Geometry) -> Predicate {
        Predicate::Spatial {
            field: self.clone(),
            relation,
            geometry,
        }
    }

    pub fn st_dwithin(&self, geometry: Geometry, distance: f64) -> Predicate {
        Predicate::WithinDistance {
            field: self.clone(),
            geometry,
            distance,
        }
    }
}
