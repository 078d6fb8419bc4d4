//! Data access layer
//!
//! The target interface compiled filters are built against:
//! - `model` - Resource models and field handles
//! - `predicate` - Predicate expression tree and logical composition
//! - `geometry` - Geometry literals used by spatial predicates
//! - `dbset` - Dataset handle that accumulates predicates
//! - `sql` - SQL rendering for multiple database dialects

pub mod dbset;
pub mod geometry;
pub mod model;
pub mod predicate;
pub mod sql;

pub use dbset::DbSet;
pub use geometry::{Geometry, Position};
pub use model::{Field, Model};
pub use predicate::{Comparison, Logical, PatternKind, Predicate, SpatialRelation, conjoin};
pub use sql::{Backend, SqlDialect, SqlParams};
