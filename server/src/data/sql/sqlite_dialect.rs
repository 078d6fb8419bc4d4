//! SQLite (SpatiaLite) SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn like(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        // Case sensitivity of plain LIKE follows PRAGMA case_sensitive_like
        if case_sensitive {
            format!("{} LIKE {}", col, param)
        } else {
            format!("LOWER({}) LIKE LOWER({})", col, param)
        }
    }

    fn regex(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            format!("{} REGEXP {}", col, param)
        } else {
            format!("{} REGEXP ('(?i)' || {})", col, param)
        }
    }

    fn geometry_from_text(&self, param: &str) -> String {
        format!("GeomFromText({})", param)
    }

    fn within_distance(&self, col: &str, geometry: &str, distance: &str) -> String {
        format!("ST_Distance({}, {}) <= {}", col, geometry, distance)
    }
}
