//! Model registry
//!
//! Built once from configuration; maps model names to their filterable
//! resources. The set of models is fixed after startup, only each resource's
//! accepted fields change.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::config::ModelConfig;
use crate::data::model::Model;
use crate::query::Resource;

#[derive(Debug, Default)]
pub struct ModelRegistry {
    resources: BTreeMap<String, Arc<Resource>>,
}

impl ModelRegistry {
    pub fn from_config(models: &[ModelConfig]) -> Result<Self> {
        let mut resources = BTreeMap::new();
        for config in models {
            let model = Model::new(&config.name, &config.table, &config.fields);
            let resource = Resource::new(model, &config.filterable)
                .with_context(|| format!("Invalid filterable fields for model {}", config.name))?;
            tracing::debug!(
                model = %config.name,
                table = %config.table,
                fields = config.fields.len(),
                filterable = config.filterable.len(),
                "Registered model"
            );
            resources.insert(config.name.clone(), Arc::new(resource));
        }

        if resources.is_empty() {
            tracing::warn!("No models configured; every query endpoint will return 404");
        }

        Ok(Self { resources })
    }

    pub fn get(&self, name: &str) -> Option<Arc<Resource>> {
        self.resources.get(name).cloned()
    }

    /// Resources ordered by model name
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
