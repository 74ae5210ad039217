//! Schema definition compiler and dynamic type-system generator.
//!
//! Collections are declared in GraphQL schema-definition language, with
//! directives controlling merge semantics, relations, indexing, and access
//! policy. This crate turns such a definition document into collection
//! descriptors ([`schema::collections_from_document`]) and grows the
//! queryable type graph from those descriptors ([`schema::SchemaManager`]):
//! per-collection query, mutation, filter, order, grouping, and aggregate
//! types, plus the static commit and scalar types shared by every store.

pub mod ast;
pub mod error;
pub mod gql;
pub mod schema;

pub use error::{Result, SchemaError};
pub use schema::{SchemaManager, collections_from_document};
