//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax
//! when rendering filter predicates.

use crate::data::predicate::SpatialRelation;

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Case-insensitive pattern matching
/// - Regular expressions
/// - Geometry constructors and distance checks
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite/DuckDB: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote an identifier (column or table name)
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Generate a LIKE comparison
    ///
    /// - PostgreSQL/DuckDB: `col ILIKE ?` when case-insensitive
    /// - SQLite: `LOWER(col) LIKE LOWER(?)` when case-insensitive
    fn like(&self, col: &str, param: &str, case_sensitive: bool) -> String;

    /// Generate a regular expression match
    ///
    /// - PostgreSQL: `col ~ $1` / `col ~* $1`
    /// - DuckDB: `regexp_matches(col, ?)` / `regexp_matches(col, ?, 'i')`
    /// - SQLite: `col REGEXP ?` (needs the REGEXP extension)
    fn regex(&self, col: &str, param: &str, case_sensitive: bool) -> String;

    /// Build a geometry from a WKT parameter
    ///
    /// - PostgreSQL/DuckDB: `ST_GeomFromText(?)`
    /// - SQLite (SpatiaLite): `GeomFromText(?)`
    fn geometry_from_text(&self, param: &str) -> String;

    /// Generate a spatial relation check between a column and a geometry
    fn spatial(&self, relation: SpatialRelation, col: &str, geometry: &str) -> String {
        format!("{}({}, {})", relation.function(), col, geometry)
    }

    /// Generate a proximity check
    ///
    /// - PostgreSQL/DuckDB: `ST_DWithin(col, geom, ?)`
    /// - SQLite (SpatiaLite): `ST_Distance(col, geom) <= ?`
    fn within_distance(&self, col: &str, geometry: &str, distance: &str) -> String {
        format!("ST_DWithin({}, {}, {})", col, geometry, distance)
    }
}
