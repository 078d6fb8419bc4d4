//! JSON filter language
//!
//! Filter documents arrive as a query parameter, are validated operator by
//! operator and compiled into a [`Predicate`](crate::data::Predicate) that
//! narrows a [`DbSet`](crate::data::DbSet).

pub mod acceptance;
pub mod compiler;
pub mod error;
pub mod geo;
pub mod operators;
pub mod resource;
pub mod stage;
pub mod validation;

pub use acceptance::{FieldSet, FieldSetError, FilterAcceptance};
pub use compiler::{ConditionCompiler, DEFAULT_MAX_DEPTH, parse_conditions};
pub use error::{QueryError, ShapeError};
pub use geo::{decode_geometry, decode_proximity};
pub use operators::{Builder, Junction, OPERATORS, OperatorSpec, lookup};
pub use resource::Resource;
pub use stage::{FilterRejection, INVALID_VALUE, QueryFilterStage};
pub use validation::Operand;
