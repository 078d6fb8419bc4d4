//! Filterable resource: a model plus its currently accepted filter fields

use super::acceptance::{FieldSet, FieldSetError, FilterAcceptance};
use crate::data::dbset::DbSet;
use crate::data::model::Model;

#[derive(Debug)]
pub struct Resource {
    model: Model,
    acceptance: FilterAcceptance,
}

impl Resource {
    pub fn new<I, S>(model: Model, filterable: I) -> Result<Self, FieldSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = FieldSet::for_model(&model, filterable)?;
        Ok(Self {
            model,
            acceptance: FilterAcceptance::new(fields),
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn acceptance(&self) -> &FilterAcceptance {
        &self.acceptance
    }

    /// Unfiltered selection over the model's table
    pub fn dbset(&self) -> DbSet {
        DbSet::new(self.model.table.clone())
    }

    /// Replace the filterable field set. On error the current set is kept.
    pub fn set_filterable<I, S>(&self, names: I) -> Result<(), FieldSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = FieldSet::for_model(&self.model, names)?;
        tracing::debug!(model = %self.model.name, "Updating filterable fields");
        self.acceptance.replace(fields);
        Ok(())
    }
}
