// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Sieve";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "sieve";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".sieve";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "sieve.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SIEVE_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "SIEVE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "SIEVE_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SIEVE_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default request body limit (1MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// Environment Variables - Query Filters
// =============================================================================

/// Environment variable for the filter query parameter name
pub const ENV_QUERY_PARAM: &str = "SIEVE_QUERY_PARAM";

/// Environment variable for the SQL dialect used in query previews
pub const ENV_DIALECT: &str = "SIEVE_DIALECT";

/// Environment variable for the filter nesting limit
pub const ENV_MAX_DEPTH: &str = "SIEVE_MAX_DEPTH";

// =============================================================================
// Query Filter Defaults
// =============================================================================

/// Default filter query parameter
pub const DEFAULT_QUERY_PARAM: &str = "where";

/// Maximum raw filter size in bytes (64KB)
pub const DEFAULT_MAX_FILTER_BYTES: usize = 64 * 1024;

/// Maximum length of a query parameter name
pub const MAX_QUERY_PARAM_LENGTH: usize = 64;

// =============================================================================
// Models
// =============================================================================

/// Maximum length of a model or field name
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum number of fields accepted in one filterable update
pub const MAX_FILTERABLE_FIELDS: usize = 256;
