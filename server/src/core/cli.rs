use clap::Parser;

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DIALECT, ENV_HOST, ENV_MAX_DEPTH, ENV_PORT, ENV_QUERY_PARAM,
};
use crate::data::sql::Backend;

#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about = "JSON query filter service", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Query parameter carrying the JSON filter
    #[arg(long, env = ENV_QUERY_PARAM)]
    pub query_param: Option<String>,

    /// SQL dialect for query previews (postgres, sqlite or duckdb)
    #[arg(long, env = ENV_DIALECT, value_parser = parse_backend)]
    pub dialect: Option<Backend>,

    /// Maximum nesting depth of a filter document
    #[arg(long, env = ENV_MAX_DEPTH)]
    pub max_depth: Option<usize>,
}

/// Parse SQL dialect from CLI/env string
fn parse_backend(s: &str) -> Result<Backend, String> {
    match s.to_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(Backend::Postgres),
        "sqlite" => Ok(Backend::Sqlite),
        "duckdb" => Ok(Backend::Duckdb),
        _ => Err(format!(
            "Invalid dialect '{}'. Valid options: postgres, sqlite, duckdb",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub query_param: Option<String>,
    pub dialect: Option<Backend>,
    pub max_depth: Option<usize>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            query_param: cli.query_param,
            dialect: cli.dialect,
            max_depth: cli.max_depth,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
