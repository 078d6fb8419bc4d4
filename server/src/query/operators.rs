//! Operator table
//!
//! Maps wire tokens to their validator and builder. The table is a static
//! slice fixed at compile time; there is no runtime registration.

use super::validation::{
    Operand, Validator, validate_default, validate_document, validate_flag, validate_geo,
    validate_geo_dwithin, validate_glue, validate_list, validate_ordering,
};
use crate::data::model::Field;
use crate::data::predicate::{Logical, Predicate, SpatialRelation};

/// Builds a field-level predicate. `None` means the operand had the wrong shape.
pub type FieldBuilder = fn(&Field, Operand) -> Option<Predicate>;

/// Logical combinator used by glue operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    And,
    Or,
}

#[derive(Debug, Clone, Copy)]
pub enum Builder {
    /// Field comparison against the enclosing field
    Generic(FieldBuilder),
    /// Combination of a list of sub-documents
    Glue(Junction),
    /// Inversion of one sub-document
    Negation,
}

#[derive(Debug, Clone, Copy)]
pub struct OperatorSpec {
    pub token: &'static str,
    pub validator: Validator,
    pub builder: Builder,
}

macro_rules! value_builder {
    ($name:ident, |$field:ident, $value:ident| $body:expr) => {
        fn $name($field: &Field, operand: Operand) -> Option<Predicate> {
            match operand {
                Operand::Value($value) => Some($body),
                _ => None,
            }
        }
    };
}

value_builder!(build_eq, |field, v| field.eq(v));
value_builder!(build_ne, |field, v| field.ne(v));
value_builder!(build_lt, |field, v| field.lt(v));
value_builder!(build_gt, |field, v| field.gt(v));
value_builder!(build_le, |field, v| field.le(v));
value_builder!(build_ge, |field, v| field.ge(v));
value_builder!(build_contains, |field, v| field.contains(v, true));
value_builder!(build_icontains, |field, v| field.contains(v, false));
value_builder!(build_like, |field, v| field.like(v, true));
value_builder!(build_ilike, |field, v| field.like(v, false));
value_builder!(build_regex, |field, v| field.regex(v, true));
value_builder!(build_iregex, |field, v| field.regex(v, false));

fn build_in(field: &Field, operand: Operand) -> Option<Predicate> {
    match operand {
        Operand::List(values) => Some(field.belongs(values)),
        _ => None,
    }
}

fn build_nin(field: &Field, operand: Operand) -> Option<Predicate> {
    build_in(field, operand).map(Logical::not)
}

fn build_exists(field: &Field, operand: Operand) -> Option<Predicate> {
    match operand {
        Operand::Flag(true) => Some(field.ne(serde_json::Value::Null)),
        Operand::Flag(false) => Some(field.eq(serde_json::Value::Null)),
        _ => None,
    }
}

macro_rules! spatial_builder {
    ($name:ident, $relation:expr) => {
        fn $name(field: &Field, operand: Operand) -> Option<Predicate> {
            match operand {
                Operand::Geometry(geometry) => Some(field.spatial($relation, geometry)),
                _ => None,
            }
        }
    };
}

spatial_builder!(build_st_contains, SpatialRelation::Contains);
spatial_builder!(build_st_equals, SpatialRelation::Equals);
spatial_builder!(build_st_intersects, SpatialRelation::Intersects);
spatial_builder!(build_st_overlaps, SpatialRelation::Overlaps);
spatial_builder!(build_st_touches, SpatialRelation::Touches);
spatial_builder!(build_st_within, SpatialRelation::Within);

fn build_st_dwithin(field: &Field, operand: Operand) -> Option<Predicate> {
    match operand {
        Operand::Proximity(geometry, distance) => Some(field.st_dwithin(geometry, distance)),
        _ => None,
    }
}

const fn generic(token: &'static str, validator: Validator, build: FieldBuilder) -> OperatorSpec {
    OperatorSpec {
        token,
        validator,
        builder: Builder::Generic(build),
    }
}

pub static OPERATORS: &[OperatorSpec] = &[
    OperatorSpec {
        token: "$and",
        validator: validate_glue,
        builder: Builder::Glue(Junction::And),
    },
    OperatorSpec {
        token: "$or",
        validator: validate_glue,
        builder: Builder::Glue(Junction::Or),
    },
    OperatorSpec {
        token: "$not",
        validator: validate_document,
        builder: Builder::Negation,
    },
    generic("$eq", validate_default, build_eq),
    generic("$ne", validate_default, build_ne),
    generic("$lt", validate_ordering, build_lt),
    generic("$gt", validate_ordering, build_gt),
    generic("$le", validate_ordering, build_le),
    generic("$ge", validate_ordering, build_ge),
    generic("$lte", validate_ordering, build_le),
    generic("$gte", validate_ordering, build_ge),
    generic("$in", validate_list, build_in),
    generic("$nin", validate_list, build_nin),
    generic("$exists", validate_flag, build_exists),
    generic("$contains", validate_default, build_contains),
    generic("$icontains", validate_default, build_icontains),
    generic("$like", validate_default, build_like),
    generic("$ilike", validate_default, build_ilike),
    generic("$regex", validate_default, build_regex),
    generic("$iregex", validate_default, build_iregex),
    generic("$geo.contains", validate_geo, build_st_contains),
    generic("$geo.equals", validate_geo, build_st_equals),
    generic("$geo.intersects", validate_geo, build_st_intersects),
    generic("$geo.overlaps", validate_geo, build_st_overlaps),
    generic("$geo.touches", validate_geo, build_st_touches),
    generic("$geo.within", validate_geo, build_st_within),
    generic("$geo.dwithin", validate_geo_dwithin, build_st_dwithin),
];

/// Look up an operator by its wire token
pub fn lookup(token: &str) -> Option<&'static OperatorSpec> {
    OPERATORS.iter().find(|entry| entry.token == token)
}
