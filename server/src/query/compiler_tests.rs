//! Tests for the filter document compiler

use serde_json::{Value, json};

use super::*;
use crate::data::geometry::{Geometry, Position};
use crate::data::predicate::SpatialRelation;

fn sample() -> Model {
    Model::new(
        "samples",
        "samples",
        ["id", "str", "int", "float", "datetime", "location"],
    )
}

fn allowed(names: &[&str]) -> FieldSet {
    FieldSet::for_model(&sample(), names.iter().copied()).unwrap()
}

fn all_fields() -> FieldSet {
    allowed(&["str", "int", "float", "datetime", "location"])
}

fn doc(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn compile_with(fields: &FieldSet, value: Value) -> Result<Option<Predicate>, QueryError> {
    let model = sample();
    ConditionCompiler::new(&model, fields).compile(&doc(value))
}

fn compile(value: Value) -> Option<Predicate> {
    compile_with(&all_fields(), value).unwrap()
}

fn field(name: &str) -> Field {
    Field::new(name)
}

// ============================================================================
// FIELD CONDITIONS
// ============================================================================

#[test]
fn test_scalar_is_shorthand_for_eq() {
    assert_eq!(
        compile(json!({"str": "bar"})),
        compile(json!({"str": {"$eq": "bar"}}))
    );
    assert_eq!(
        compile(json!({"str": "bar"})),
        Some(field("str").eq(json!("bar")))
    );
}

#[test]
fn test_null_and_list_scalars_are_shorthand_for_eq() {
    assert_eq!(
        compile(json!({"str": null})),
        Some(field("str").eq(Value::Null))
    );
    assert_eq!(
        compile(json!({"int": [1, 2]})),
        Some(field("int").eq(json!([1, 2])))
    );
}

#[test]
fn test_range_on_one_field() {
    assert_eq!(
        compile(json!({"int": {"$gte": 0, "$lt": 2}})),
        Some(field("int").ge(json!(0)).and(field("int").lt(json!(2))))
    );
}

#[test]
fn test_datetime_range() {
    let t1 = "2024-05-01T00:00:00Z";
    let t2 = "2024-05-02T00:00:00Z";
    assert_eq!(
        compile(json!({"datetime": {"$gte": t1, "$lt": t2}})),
        Some(
            field("datetime")
                .ge(json!(t1))
                .and(field("datetime").lt(json!(t2)))
        )
    );
}

#[test]
fn test_pattern_operators() {
    assert_eq!(
        compile(json!({"str": {"$regex": "^ba"}})),
        Some(field("str").regex(json!("^ba"), true))
    );
    assert_eq!(
        compile(json!({"str": {"$iregex": "^ba"}})),
        Some(field("str").regex(json!("^ba"), false))
    );
    assert_eq!(
        compile(json!({"str": {"$icontains": "BAR"}})),
        Some(field("str").contains(json!("BAR"), false))
    );
    assert_eq!(
        compile(json!({"str": {"$like": "b_r%"}})),
        Some(field("str").like(json!("b_r%"), true))
    );
}

#[test]
fn test_membership_operators() {
    assert_eq!(
        compile(json!({"int": {"$in": [4, 5]}})),
        Some(field("int").belongs(vec![json!(4), json!(5)]))
    );
    assert_eq!(
        compile(json!({"int": {"$nin": [4, 5]}})),
        Some(field("int").belongs(vec![json!(4), json!(5)]).not())
    );
}

#[test]
fn test_exists() {
    assert_eq!(
        compile(json!({"float": {"$exists": true}})),
        Some(field("float").ne(Value::Null))
    );
    assert_eq!(
        compile(json!({"float": {"$exists": false}})),
        Some(field("float").eq(Value::Null))
    );
}

#[test]
fn test_every_field_operator_builds_its_predicate() {
    let square = json!({"type": "polygon", "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]]});
    let square_geom = Geometry::Polygon(vec![vec![
        Position::new(0.0, 0.0),
        Position::new(4.0, 0.0),
        Position::new(4.0, 4.0),
        Position::new(0.0, 4.0),
        Position::new(0.0, 0.0),
    ]]);
    let spatial = |relation| field("location").spatial(relation, square_geom.clone());

    let cases: Vec<(&str, &str, Value, Predicate)> = vec![
        ("int", "$eq", json!(3), field("int").eq(json!(3))),
        ("int", "$ne", json!(3), field("int").ne(json!(3))),
        ("int", "$lt", json!(3), field("int").lt(json!(3))),
        ("int", "$gt", json!(3), field("int").gt(json!(3))),
        ("int", "$le", json!(3), field("int").le(json!(3))),
        ("int", "$ge", json!(3), field("int").ge(json!(3))),
        ("int", "$lte", json!(3), field("int").le(json!(3))),
        ("int", "$gte", json!(3), field("int").ge(json!(3))),
        ("int", "$in", json!([1, 2]), field("int").belongs(vec![json!(1), json!(2)])),
        (
            "int",
            "$nin",
            json!([1, 2]),
            field("int").belongs(vec![json!(1), json!(2)]).not(),
        ),
        ("str", "$exists", json!(true), field("str").ne(Value::Null)),
        ("str", "$contains", json!("ba"), field("str").contains(json!("ba"), true)),
        ("str", "$icontains", json!("ba"), field("str").contains(json!("ba"), false)),
        ("str", "$like", json!("b%"), field("str").like(json!("b%"), true)),
        ("str", "$ilike", json!("b%"), field("str").like(json!("b%"), false)),
        ("str", "$regex", json!("^b"), field("str").regex(json!("^b"), true)),
        ("str", "$iregex", json!("^b"), field("str").regex(json!("^b"), false)),
        ("location", "$geo.contains", square.clone(), spatial(SpatialRelation::Contains)),
        ("location", "$geo.equals", square.clone(), spatial(SpatialRelation::Equals)),
        ("location", "$geo.intersects", square.clone(), spatial(SpatialRelation::Intersects)),
        ("location", "$geo.overlaps", square.clone(), spatial(SpatialRelation::Overlaps)),
        ("location", "$geo.touches", square.clone(), spatial(SpatialRelation::Touches)),
        ("location", "$geo.within", square.clone(), spatial(SpatialRelation::Within)),
        (
            "location",
            "$geo.dwithin",
            json!({"geometry": square, "distance": 2.5}),
            field("location").st_dwithin(square_geom.clone(), 2.5),
        ),
    ];

    for (name, token, value, expected) in cases {
        let mut condition = Map::new();
        condition.insert(token.to_string(), value);
        let mut filter = Map::new();
        filter.insert(name.to_string(), Value::Object(condition));

        assert_eq!(
            compile(Value::Object(filter)),
            Some(expected),
            "for {}",
            token
        );
    }
}

// ============================================================================
// UNKNOWN KEYS
// ============================================================================

#[test]
fn test_unknown_fields_are_dropped() {
    let fields = allowed(&["str"]);
    assert_eq!(
        compile_with(&fields, json!({"str": "bar", "int": 3})).unwrap(),
        compile_with(&fields, json!({"str": "bar"})).unwrap()
    );
}

#[test]
fn test_unknown_operators_are_dropped() {
    assert_eq!(
        compile(json!({"int": {"$between": [1, 2], "$gt": 1}})),
        Some(field("int").gt(json!(1)))
    );
}

#[test]
fn test_allowed_but_undeclared_field_is_dropped() {
    let model = Model::new("samples", "samples", ["str"]);
    let other = Model::new("other", "other", ["str", "ghost"]);
    let fields = FieldSet::for_model(&other, ["str", "ghost"]).unwrap();
    let compiled = ConditionCompiler::new(&model, &fields)
        .compile(&doc(json!({"ghost": 1, "str": "x"})))
        .unwrap();
    assert_eq!(compiled, Some(field("str").eq(json!("x"))));
}

#[test]
fn test_empty_document_compiles_to_nothing() {
    assert_eq!(compile(json!({})), None);
    assert_eq!(compile(json!({"nope": 1})), None);
    assert_eq!(compile(json!({"int": {}})), None);
}

// ============================================================================
// GLUE AND NEGATION
// ============================================================================

#[test]
fn test_and_equals_conjunction_of_parts() {
    let a = json!({"str": "bar"});
    let b = json!({"int": {"$gt": 2}});
    assert_eq!(
        compile(json!({"$and": [a.clone(), b.clone()]})),
        Some(compile(a).unwrap().and(compile(b).unwrap()))
    );
}

#[test]
fn test_or_equals_disjunction_of_parts() {
    let a = json!({"float": 3.2});
    let b = json!({"int": {"$lt": 0}});
    assert_eq!(
        compile(json!({"$or": [a.clone(), b.clone()]})),
        Some(compile(a).unwrap().or(compile(b).unwrap()))
    );
}

#[test]
fn test_not_equals_negation() {
    let inner = json!({"int": {"$in": [4, 5]}});
    assert_eq!(
        compile(json!({"$not": inner.clone()})),
        Some(compile(inner).unwrap().not())
    );
}

#[test]
fn test_not_of_empty_document_is_false() {
    assert_eq!(compile(json!({"$not": {}})), Some(Predicate::Const(false)));
}

#[test]
fn test_and_skips_unrestricted_parts() {
    assert_eq!(
        compile(json!({"$and": [{}, {"str": "x"}, {"unknown": 1}]})),
        Some(field("str").eq(json!("x")))
    );
}

#[test]
fn test_or_with_unrestricted_part_is_unrestricted() {
    assert_eq!(compile(json!({"$or": [{"str": "x"}, {}]})), None);
}

#[test]
fn test_empty_glue_lists_are_unrestricted() {
    assert_eq!(compile(json!({"$and": []})), None);
    assert_eq!(compile(json!({"$or": []})), None);
}

#[test]
fn test_wide_glue_lists_compile_flat() {
    let terms: Vec<Value> = (0..5000).map(|i| json!({"int": i})).collect();

    let Some(Predicate::Or(or_terms)) = compile(json!({"$or": terms.clone()})) else {
        panic!("expected a disjunction");
    };
    assert_eq!(or_terms.len(), 5000);
    assert_eq!(or_terms[4999], field("int").eq(json!(4999)));

    let Some(Predicate::And(and_terms)) = compile(json!({"$and": terms})) else {
        panic!("expected a conjunction");
    };
    assert_eq!(and_terms.len(), 5000);
}

#[test]
fn test_glue_resets_field_context() {
    let err = compile_with(
        &all_fields(),
        json!({"int": {"$or": [{"$lt": 0}, {"$gt": 10}]}}),
    )
    .unwrap_err();
    assert_eq!(err, QueryError::invalid("$lt", &json!(0)));
}

#[test]
fn test_combined_document() {
    let t1 = "2024-05-01T00:00:00Z";
    let t2 = "2024-05-02T00:00:00Z";
    let compiled = compile(json!({
        "str": "bar",
        "int": {"$gt": 2},
        "$not": {"int": {"$in": [4, 5]}},
        "$or": [
            {"float": 3.2},
            {"datetime": {"$gte": t1, "$lt": t2}}
        ]
    }));

    let not_in = field("int").belongs(vec![json!(4), json!(5)]).not();
    let either = field("float").eq(json!(3.2)).or(field("datetime")
        .ge(json!(t1))
        .and(field("datetime").lt(json!(t2))));
    let fields = field("str").eq(json!("bar")).and(field("int").gt(json!(2)));

    assert_eq!(compiled, Some(not_in.and(either).and(fields)));
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_geo_equals_matches_direct_point() {
    assert_eq!(
        compile(json!({"location": {"$geo.equals": {"type": "point", "coordinates": [1, 2]}}})),
        Some(field("location").spatial(
            SpatialRelation::Equals,
            Geometry::Point(Position::new(1.0, 2.0))
        ))
    );
}

#[test]
fn test_geo_dwithin() {
    assert_eq!(
        compile(json!({"location": {"$geo.dwithin": {
            "geometry": {"type": "point", "coordinates": [0, 0]},
            "distance": 10
        }}})),
        Some(field("location").st_dwithin(Geometry::Point(Position::new(0.0, 0.0)), 10.0))
    );
}

#[test]
fn test_geo_rejects_malformed_literal() {
    let value = json!({"type": "hexagon", "coordinates": [1, 2]});
    let err = compile_with(&all_fields(), json!({"location": {"$geo.within": value}}))
        .unwrap_err();
    assert_eq!(err, QueryError::invalid("$geo.within", &value));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_in_requires_list() {
    let err = compile_with(&all_fields(), json!({"int": {"$in": "not-a-list"}})).unwrap_err();
    assert_eq!(err.op(), Some("$in"));
    assert_eq!(err.to_string(), r#"Invalid $in condition: "not-a-list""#);
}

#[test]
fn test_exists_requires_boolean() {
    let err = compile_with(&all_fields(), json!({"int": {"$exists": "yes"}})).unwrap_err();
    assert_eq!(err.op(), Some("$exists"));
}

#[test]
fn test_ordering_requires_number_or_datetime() {
    let err = compile_with(&all_fields(), json!({"int": {"$gt": "soon"}})).unwrap_err();
    assert_eq!(err, QueryError::invalid("$gt", &json!("soon")));
}

#[test]
fn test_glue_requires_list_of_documents() {
    let err = compile_with(&all_fields(), json!({"$or": {"str": "x"}})).unwrap_err();
    assert_eq!(err.op(), Some("$or"));
    let err = compile_with(&all_fields(), json!({"$and": [{"str": "x"}, 3]})).unwrap_err();
    assert_eq!(err.op(), Some("$and"));
}

#[test]
fn test_not_requires_document() {
    let err = compile_with(&all_fields(), json!({"$not": [1]})).unwrap_err();
    assert_eq!(err, QueryError::invalid("$not", &json!([1])));
}

#[test]
fn test_field_operator_without_field_context_is_rejected() {
    let err = compile_with(&all_fields(), json!({"$eq": 3})).unwrap_err();
    assert_eq!(err, QueryError::invalid("$eq", &json!(3)));
}

#[test]
fn test_nested_error_propagates_unchanged() {
    let err = compile_with(
        &all_fields(),
        json!({"$or": [{"str": "x"}, {"$not": {"int": {"$in": 7}}}]}),
    )
    .unwrap_err();
    assert_eq!(err, QueryError::invalid("$in", &json!(7)));
}

#[test]
fn test_depth_limit() {
    let mut value = json!({"str": "x"});
    for _ in 0..10 {
        value = json!({"$not": value});
    }
    let model = sample();
    let fields = all_fields();

    let shallow = ConditionCompiler::new(&model, &fields)
        .with_max_depth(4)
        .compile(&doc(value.clone()));
    assert_eq!(shallow, Err(QueryError::TooDeep { max_depth: 4 }));

    let deep = ConditionCompiler::new(&model, &fields)
        .with_max_depth(16)
        .compile(&doc(value));
    assert!(deep.is_ok());
}

// ============================================================================
// DBSET INTEGRATION
// ============================================================================

#[test]
fn test_parse_conditions_narrows_dbset() {
    let model = sample();
    let fields = all_fields();
    let dbset = parse_conditions(
        &model,
        DbSet::new("samples"),
        &doc(json!({"$or": [{"str": "bar"}, {"int": {"$gt": 0}}]})),
        &fields,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();
    assert_eq!(
        dbset.predicate(),
        Some(&field("str").eq(json!("bar")).or(field("int").gt(json!(0))))
    );
}

#[test]
fn test_parse_conditions_leaves_dbset_for_empty_filter() {
    let model = sample();
    let fields = all_fields();
    let dbset = parse_conditions(
        &model,
        DbSet::new("samples"),
        &doc(json!({})),
        &fields,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();
    assert_eq!(dbset, DbSet::new("samples"));
}
