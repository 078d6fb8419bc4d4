//! Filterable field tracking
//!
//! Each resource has a set of fields clients may filter on. The set is replaced
//! wholesale; readers take a cheap snapshot and never observe a partial update.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::data::model::Model;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldSetError {
    #[error("Model {model} has no field named {field}")]
    UnknownField { model: String, field: String },
}

/// Set of field names permitted in filter documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: HashSet<String>,
}

impl FieldSet {
    /// Build a set for `model`, rejecting names the model does not define
    pub fn for_model<I, S>(model: &Model, names: I) -> Result<Self, FieldSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .map(|name| {
                if model.has_field(&name) {
                    Ok(name)
                } else {
                    Err(FieldSetError::UnknownField {
                        model: model.name.clone(),
                        field: name,
                    })
                }
            })
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in sorted order
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

/// Currently active filterable fields of one resource
#[derive(Debug, Default)]
pub struct FilterAcceptance {
    current: RwLock<Arc<FieldSet>>,
}

impl FilterAcceptance {
    pub fn new(fields: FieldSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(fields)),
        }
    }

    /// Current set; unaffected by later replacements
    pub fn snapshot(&self) -> Arc<FieldSet> {
        self.current.read().clone()
    }

    /// Swap in a new set
    pub fn replace(&self, fields: FieldSet) {
        let fields = Arc::new(fields);
        tracing::debug!(count = fields.len(), "Replacing filterable fields");
        *self.current.write() = fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::new("samples", "samples", ["str", "int", "float"])
    }

    #[test]
    fn for_model_rejects_unknown_fields() {
        let err = FieldSet::for_model(&model(), ["str", "nope"]).unwrap_err();
        assert_eq!(
            err,
            FieldSetError::UnknownField {
                model: "samples".to_string(),
                field: "nope".to_string(),
            }
        );
    }

    #[test]
    fn sorted_names() {
        let set = FieldSet::for_model(&model(), ["int", "float", "str"]).unwrap();
        assert_eq!(set.sorted(), vec!["float", "int", "str"]);
    }

    #[test]
    fn replace_swaps_whole_set() {
        let m = model();
        let acceptance = FilterAcceptance::new(FieldSet::for_model(&m, ["str"]).unwrap());
        let before = acceptance.snapshot();

        acceptance.replace(FieldSet::for_model(&m, ["int", "float"]).unwrap());

        assert!(before.contains("str"));
        assert!(!before.contains("int"));
        let after = acceptance.snapshot();
        assert!(!after.contains("str"));
        assert!(after.contains("int"));
        assert!(after.contains("float"));
    }

    #[test]
    fn empty_by_default() {
        let acceptance = FilterAcceptance::default();
        assert!(acceptance.snapshot().is_empty());
        acceptance.replace(FieldSet::for_model(&model(), ["int"]).unwrap());
        assert!(!acceptance.snapshot().is_empty());
    }
}
