//! Predicate expression tree
//!
//! Compiled filters are trees of field-level leaves joined by AND/OR/NOT.
//! Combination goes through the [`Logical`] trait so callers never build
//! interior nodes by hand.

use serde_json::Value;

use super::geometry::Geometry;
use super::model::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Contains,
    Like,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialRelation {
    Contains,
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

impl SpatialRelation {
    /// Name of the OGC function implementing the relation
    pub fn function(&self) -> &'static str {
        match self {
            Self::Contains => "ST_Contains",
            Self::Equals => "ST_Equals",
            Self::Intersects => "ST_Intersects",
            Self::Overlaps => "ST_Overlaps",
            Self::Touches => "ST_Touches",
            Self::Within => "ST_Within",
        }
    }
}

/// Boolean condition over a dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        field: Field,
        op: Comparison,
        value: Value,
    },
    Belongs {
        field: Field,
        values: Vec<Value>,
    },
    Pattern {
        field: Field,
        kind: PatternKind,
        pattern: Value,
        case_sensitive: bool,
    },
    Spatial {
        field: Field,
        relation: SpatialRelation,
        geometry: Geometry,
    },
    WithinDistance {
        field: Field,
        geometry: Geometry,
        distance: f64,
    },
    /// Conjunction of every term; an empty list matches everything
    And(Vec<Predicate>),
    /// Disjunction of every term; an empty list matches nothing
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Const(bool),
}

/// Logical composition over predicate expressions
pub trait Logical: Sized {
    fn and(self, other: Self) -> Self;
    fn or(self, other: Self) -> Self;
    fn not(self) -> Self;
}

impl Predicate {
    fn into_and_terms(self) -> Vec<Predicate> {
        match self {
            Predicate::And(terms) => terms,
            other => vec![other],
        }
    }

    fn into_or_terms(self) -> Vec<Predicate> {
        match self {
            Predicate::Or(terms) => terms,
            other => vec![other],
        }
    }
}

// Same-kind junctions are flattened so chaining N terms stays one level deep.
impl Logical for Predicate {
    fn and(self, other: Self) -> Self {
        let mut terms = self.into_and_terms();
        terms.extend(other.into_and_terms());
        Predicate::And(terms)
    }

    fn or(self, other: Self) -> Self {
        let mut terms = self.into_or_terms();
        terms.extend(other.into_or_terms());
        Predicate::Or(terms)
    }

    fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}

/// AND-combine two optional predicates, treating `None` as "no restriction"
pub fn conjoin<P: Logical>(left: Option<P>, right: Option<P>) -> Option<P> {
    match (left, right) {
        (Some(l), Some(r)) => Some(l.and(r)),
        (l, None) => l,
        (None, r) => r,
    }
}
