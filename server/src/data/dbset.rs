//! Dataset handle
//!
//! A `DbSet` is the selection a request works on: a table plus an optional
//! accumulated predicate. Filters narrow it through [`DbSet::and_where`].

use super::predicate::{Predicate, conjoin};
use super::sql::{SqlDialect, SqlParams, render_predicate};

#[derive(Debug, Clone, PartialEq)]
pub struct DbSet {
    table: String,
    predicate: Option<Predicate>,
}

impl DbSet {
    /// Unfiltered selection over a table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            predicate: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Narrow the selection, AND-ing onto any existing predicate
    pub fn and_where(self, predicate: Predicate) -> Self {
        Self {
            table: self.table,
            predicate: conjoin(self.predicate, Some(predicate)),
        }
    }

    /// Render a SELECT statement for this selection
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!("SELECT * FROM {}", dialect.quote_ident(&self.table));
        if let Some(ref predicate) = self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&render_predicate(predicate, dialect, &mut params));
        }
        (sql, params)
    }
}
