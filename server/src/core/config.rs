use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_MAX_FILTER_BYTES, DEFAULT_PORT,
    DEFAULT_QUERY_PARAM, MAX_QUERY_PARAM_LENGTH,
};
use crate::data::sql::Backend;
use crate::query::DEFAULT_MAX_DEPTH;

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Query filter configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryFileConfig {
    pub param: Option<String>,
    pub max_depth: Option<usize>,
    pub max_filter_bytes: Option<usize>,
    pub dialect: Option<Backend>,
}

/// One model entry
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFileConfig {
    pub name: String,
    /// Table name, defaults to the model name
    pub table: Option<String>,
    pub fields: Vec<String>,
    #[serde(default)]
    pub filterable: Vec<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub query: Option<QueryFileConfig>,
    pub models: Option<Vec<ModelFileConfig>>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence).
    /// A `models` list replaces the current list as a whole.
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(query) = other.query {
            let current = self.query.get_or_insert_with(QueryFileConfig::default);
            if query.param.is_some() {
                current.param = query.param;
            }
            if query.max_depth.is_some() {
                current.max_depth = query.max_depth;
            }
            if query.max_filter_bytes.is_some() {
                current.max_filter_bytes = query.max_filter_bytes;
            }
            if query.dialect.is_some() {
                current.dialect = query.dialect;
            }
        }

        if let Some(models) = other.models {
            tracing::trace!(count = models.len(), "Replacing models");
            self.models = Some(models);
        }
    }
}

// =============================================================================
// Runtime Config
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Query parameter carrying the filter
    pub param: String,
    pub max_depth: usize,
    pub max_filter_bytes: usize,
    /// Dialect used to render query previews
    pub dialect: Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub name: String,
    pub table: String,
    pub fields: Vec<String>,
    pub filterable: Vec<String>,
}

impl From<ModelFileConfig> for ModelConfig {
    fn from(model: ModelFileConfig) -> Self {
        Self {
            table: model.table.unwrap_or_else(|| model.name.clone()),
            name: model.name,
            fields: model.fields,
            filterable: model.filterable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub query: QueryConfig,
    pub models: Vec<ModelConfig>,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.sieve/sieve.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with_profile(cli, get_profile_config_path())
    }

    fn load_with_profile(cli: &CliConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_home(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::resolve(file_config, cli)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_query = file_config.query.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let query = QueryConfig {
            param: cli
                .query_param
                .clone()
                .or(file_query.param)
                .unwrap_or_else(|| DEFAULT_QUERY_PARAM.to_string()),
            max_depth: cli
                .max_depth
                .or(file_query.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            max_filter_bytes: file_query
                .max_filter_bytes
                .unwrap_or(DEFAULT_MAX_FILTER_BYTES),
            dialect: cli.dialect.or(file_query.dialect).unwrap_or_default(),
        };

        let models: Vec<ModelConfig> = file_config
            .models
            .unwrap_or_default()
            .into_iter()
            .map(ModelConfig::from)
            .collect();

        let config = Self {
            server,
            query,
            models,
        };
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            param = %config.query.param,
            dialect = %config.query.dialect,
            models = config.models.len(),
            "Configuration resolved"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let param = &self.query.param;
        if param.is_empty() || param.len() > MAX_QUERY_PARAM_LENGTH {
            anyhow::bail!(
                "query.param must be 1-{} characters, got {:?}",
                MAX_QUERY_PARAM_LENGTH,
                param
            );
        }
        if self.query.max_depth == 0 {
            anyhow::bail!("query.max_depth must be greater than 0");
        }
        if self.query.max_filter_bytes == 0 {
            anyhow::bail!("query.max_filter_bytes must be greater than 0");
        }

        let mut names = HashSet::new();
        for model in &self.models {
            if !names.insert(model.name.as_str()) {
                anyhow::bail!("Duplicate model name in config: {}", model.name);
            }
        }
        Ok(())
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
