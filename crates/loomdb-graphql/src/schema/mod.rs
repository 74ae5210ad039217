//! Schema compilation: from a parsed definition document to collection
//! descriptors, and from descriptors to the generated type graph.

mod collection;
mod descriptions;
mod generate;
mod manager;
mod relations;
pub mod types;

pub use collection::{collections_from_document, is_valid_index_name};
pub use descriptions::{default_crdt_for_field_kind, field_kind_type_ref};
pub use manager::SchemaManager;
