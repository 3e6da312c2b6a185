//! In-memory criteria: an entity schema to resolve fields against, a
//! builder producing a predicate tree, and a named-parameter map.

pub mod builder;
pub mod parameters;
pub mod schema;

pub use builder::{Comparison, CriteriaBuilder, Predicate};
pub use parameters::NamedParameters;
pub use schema::EntitySchema;
