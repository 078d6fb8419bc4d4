//! DuckDB (spatial extension) SQL dialect implementation

use super::SqlDialect;

/// DuckDB SQL dialect
pub struct DuckdbDialect;

impl SqlDialect for DuckdbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn like(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            format!("{} LIKE {}", col, param)
        } else {
            format!("{} ILIKE {}", col, param)
        }
    }

    fn regex(&self, col: &str, param: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            format!("regexp_matches({}, {})", col, param)
        } else {
            format!("regexp_matches({}, {}, 'i')", col, param)
        }
    }

    fn geometry_from_text(&self, param: &str) -> String {
        format!("ST_GeomFromText({})", param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = DuckdbDialect;
        assert_eq!(dialect.placeholder(1), "?");
    }

    #[test]
    fn test_regex() {
        let dialect = DuckdbDialect;
        assert_eq!(
            dialect.regex("\"name\"", "?", true),
            "regexp_matches(\"name\", ?)"
        );
        assert_eq!(
            dialect.regex("\"name\"", "?", false),
            "regexp_matches(\"name\", ?, 'i')"
        );
    }

    #[test]
    fn test_like() {
        let dialect = DuckdbDialect;
        assert_eq!(dialect.like("\"name\"", "?", false), "\"name\" ILIKE ?");
    }
}
