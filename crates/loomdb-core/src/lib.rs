//! Core descriptor types for LoomDB collections.
//!
//! This crate defines the collection, schema, and field descriptors that the
//! schema compiler produces and the storage, CRDT-merge, and query layers
//! consume. The descriptors are plain data: all schema analysis lives in
//! `loomdb-graphql`.

pub mod collection;
pub mod crdt;
pub mod embedding;
pub mod error;
pub mod index;
pub mod kind;
pub mod policy;
pub mod request;

pub use collection::{
    Collection, CollectionFieldDescription, CollectionVersion, FieldDefinition, QuerySource,
    Schema, SchemaFieldDescription,
};
pub use crdt::CType;
pub use embedding::VectorEmbeddingDescription;
pub use error::{CoreError, Result};
pub use index::{
    EncryptedIndexCreateRequest, EncryptedIndexType, IndexDescription, IndexedFieldDescription,
};
pub use kind::FieldKind;
pub use policy::PolicyDescription;
