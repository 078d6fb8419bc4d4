//! Filter document compiler
//!
//! Turns a JSON filter document into a single [`Predicate`]:
//!
//! - operator keys (`$and`, `$gte`, `$geo.within`, ...) are dispatched through
//!   the operator table in document order and AND-ed together
//! - allowed field keys open a field context; scalar values are shorthand for
//!   `{"$eq": value}`
//! - the operator group and the field group are AND-ed
//! - keys that are neither are ignored
//!
//! `None` means the document places no restriction on the dataset.

use serde_json::{Map, Value};

use super::acceptance::FieldSet;
use super::error::QueryError;
use super::operators::{self, Builder, Junction, OperatorSpec};
use super::validation::Operand;
use crate::data::dbset::DbSet;
use crate::data::model::{Field, Model};
use crate::data::predicate::{Logical, Predicate, conjoin};

/// Default bound on document nesting
pub const DEFAULT_MAX_DEPTH: usize = 32;

pub struct ConditionCompiler<'a> {
    model: &'a Model,
    allowed: &'a FieldSet,
    max_depth: usize,
}

impl<'a> ConditionCompiler<'a> {
    pub fn new(model: &'a Model, allowed: &'a FieldSet) -> Self {
        Self {
            model,
            allowed,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Compile a whole filter document
    pub fn compile(&self, doc: &Map<String, Value>) -> Result<Option<Predicate>, QueryError> {
        self.conditions(doc, None, 0)
    }

    fn conditions(
        &self,
        doc: &Map<String, Value>,
        context: Option<&Field>,
        depth: usize,
    ) -> Result<Option<Predicate>, QueryError> {
        if depth > self.max_depth {
            return Err(QueryError::TooDeep {
                max_depth: self.max_depth,
            });
        }

        let mut step = None;
        for (key, value) in doc {
            if let Some(entry) = operators::lookup(key) {
                let predicate = self.operator(entry, value, context, depth)?;
                step = conjoin(step, predicate);
            }
        }

        let mut inner = None;
        for (key, value) in doc {
            if operators::lookup(key).is_some() || !self.allowed.contains(key) {
                continue;
            }
            let Some(field) = self.model.field(key) else {
                continue;
            };
            let predicate = match value {
                Value::Object(sub) => self.conditions(sub, Some(&field), depth + 1)?,
                scalar => {
                    let mut shorthand = Map::with_capacity(1);
                    shorthand.insert("$eq".to_string(), scalar.clone());
                    self.conditions(&shorthand, Some(&field), depth + 1)?
                }
            };
            inner = conjoin(inner, predicate);
        }

        Ok(conjoin(step, inner))
    }

    fn operator(
        &self,
        entry: &OperatorSpec,
        value: &Value,
        context: Option<&Field>,
        depth: usize,
    ) -> Result<Option<Predicate>, QueryError> {
        let invalid = || QueryError::invalid(entry.token, value);

        let operand = (entry.validator)(value).map_err(|e| {
            tracing::debug!(op = entry.token, error = %e, "Rejected operator value");
            invalid()
        })?;

        match (entry.builder, operand) {
            (Builder::Generic(build), operand) => {
                let field = context.ok_or_else(invalid)?;
                build(field, operand).map(Some).ok_or_else(invalid)
            }
            (Builder::Glue(junction), Operand::Documents(docs)) => {
                self.glue(junction, &docs, depth)
            }
            (Builder::Negation, Operand::Document(doc)) => {
                let negated = match self.conditions(&doc, None, depth + 1)? {
                    Some(predicate) => predicate.not(),
                    None => Predicate::Const(false),
                };
                Ok(Some(negated))
            }
            _ => Err(invalid()),
        }
    }

    /// Combine sub-documents. An unrestricted sub-document is the identity
    /// under AND and absorbs the whole disjunction under OR.
    fn glue(
        &self,
        junction: Junction,
        docs: &[Map<String, Value>],
        depth: usize,
    ) -> Result<Option<Predicate>, QueryError> {
        let mut combined: Option<Predicate> = None;
        let mut unrestricted = false;

        for doc in docs {
            let predicate = self.conditions(doc, None, depth + 1)?;
            match (junction, predicate) {
                (Junction::And, predicate) => combined = conjoin(combined, predicate),
                (Junction::Or, Some(predicate)) => {
                    combined = Some(match combined {
                        Some(acc) => acc.or(predicate),
                        None => predicate,
                    });
                }
                (Junction::Or, None) => unrestricted = true,
            }
        }

        if unrestricted { Ok(None) } else { Ok(combined) }
    }
}

/// Compile `doc` and narrow `dbset` with the result
pub fn parse_conditions(
    model: &Model,
    dbset: DbSet,
    doc: &Map<String, Value>,
    allowed: &FieldSet,
    max_depth: usize,
) -> Result<DbSet, QueryError> {
    let compiled = ConditionCompiler::new(model, allowed)
        .with_max_depth(max_depth)
        .compile(doc)?;
    Ok(match compiled {
        Some(predicate) => dbset.and_where(predicate),
        None => dbset,
    })
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
