//! Predicate to SQL rendering
//!
//! Walks a [`Predicate`] tree and produces a WHERE clause fragment with
//! dialect placeholders, collecting bound values in [`SqlParams`].

use serde::Serialize;
use serde_json::Value;

use super::SqlDialect;
use crate::data::predicate::{Comparison, PatternKind, Predicate};
use crate::utils::sql::contains_pattern;

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Serialize)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

impl SqlParams {
    /// Bind a value and return its placeholder
    fn bind(&mut self, dialect: &dyn SqlDialect, value: Value) -> String {
        self.values.push(value);
        dialect.placeholder(self.values.len())
    }
}

fn pattern_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_junction(
    terms: &[Predicate],
    keyword: &str,
    empty: &str,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    match terms {
        [] => empty.to_string(),
        [single] => render_predicate(single, dialect, params),
        _ => {
            let parts: Vec<String> = terms
                .iter()
                .map(|term| render_predicate(term, dialect, params))
                .collect();
            format!("({})", parts.join(&format!(" {} ", keyword)))
        }
    }
}

/// Generate SQL WHERE clause fragment for a predicate
pub fn render_predicate(
    predicate: &Predicate,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    match predicate {
        Predicate::Compare { field, op, value } => {
            let col = dialect.quote_ident(field.name());
            match (op, value) {
                (Comparison::Eq, Value::Null) => format!("{} IS NULL", col),
                (Comparison::Ne, Value::Null) => format!("{} IS NOT NULL", col),
                _ => {
                    let op = match op {
                        Comparison::Eq => "=",
                        Comparison::Ne => "<>",
                        Comparison::Lt => "<",
                        Comparison::Gt => ">",
                        Comparison::Le => "<=",
                        Comparison::Ge => ">=",
                    };
                    let ph = params.bind(dialect, value.clone());
                    format!("{} {} {}", col, op, ph)
                }
            }
        }
        Predicate::Belongs { field, values } => {
            if values.is_empty() {
                return "1=0".to_string();
            }
            let col = dialect.quote_ident(field.name());
            let placeholders: Vec<String> = values
                .iter()
                .map(|v| params.bind(dialect, v.clone()))
                .collect();
            format!("{} IN ({})", col, placeholders.join(", "))
        }
        Predicate::Pattern {
            field,
            kind,
            pattern,
            case_sensitive,
        } => {
            let col = dialect.quote_ident(field.name());
            match kind {
                PatternKind::Contains => {
                    let like = contains_pattern(&pattern_text(pattern));
                    let ph = params.bind(dialect, Value::String(like));
                    format!("{} ESCAPE '\\'", dialect.like(&col, &ph, *case_sensitive))
                }
                PatternKind::Like => {
                    let ph = params.bind(dialect, Value::String(pattern_text(pattern)));
                    dialect.like(&col, &ph, *case_sensitive)
                }
                PatternKind::Regex => {
                    let ph = params.bind(dialect, Value::String(pattern_text(pattern)));
                    dialect.regex(&col, &ph, *case_sensitive)
                }
            }
        }
        Predicate::Spatial {
            field,
            relation,
            geometry,
        } => {
            let col = dialect.quote_ident(field.name());
            let ph = params.bind(dialect, Value::String(geometry.to_wkt()));
            dialect.spatial(*relation, &col, &dialect.geometry_from_text(&ph))
        }
        Predicate::WithinDistance {
            field,
            geometry,
            distance,
        } => {
            let col = dialect.quote_ident(field.name());
            let geom_ph = params.bind(dialect, Value::String(geometry.to_wkt()));
            let geom = dialect.geometry_from_text(&geom_ph);
            let dist_ph = params.bind(dialect, Value::from(*distance));
            dialect.within_distance(&col, &geom, &dist_ph)
        }
        Predicate::And(terms) => render_junction(terms, "AND", "1=1", dialect, params),
        Predicate::Or(terms) => render_junction(terms, "OR", "1=0", dialect, params),
        Predicate::Not(inner) => format!("NOT ({})", render_predicate(inner, dialect, params)),
        Predicate::Const(true) => "1=1".to_string(),
        Predicate::Const(false) => "1=0".to_string(),
    }
}
