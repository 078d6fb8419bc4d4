//! PostgreSQL (PostGIS) SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn like(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            format!("{} LIKE {}", col, param)
        } else {
            format!("{} ILIKE {}", col, param)
        }
    }

    fn regex(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        let op = if case_sensitive { "~" } else { "~*" };
        format!("{} {} {}", col, op, param)
    }

    fn geometry_from_text(&self, param: &str) -> String {
        format!("ST_GeomFromText({})", param)
    }
}
