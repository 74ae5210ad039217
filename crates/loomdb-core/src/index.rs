//! Secondary-index descriptors.
//!
//! These are produced by the schema compiler from `@index` and
//! `@encryptedIndex` directives and consumed by the storage index engine.

use serde::{Deserialize, Serialize};

/// A single field within an index, with its ordering direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFieldDescription {
    pub name: String,
    pub descending: bool,
}

/// A request to create a secondary index on a collection.
///
/// An empty `name` means the storage layer will assign one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    /// Ordered list of indexed fields.
    pub fields: Vec<IndexedFieldDescription>,
    pub unique: bool,
}

/// The kind of lookup an encrypted index supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptedIndexType {
    /// Deterministic equality lookup. Currently the only supported type.
    Equality,
}

/// A request to create an encrypted index on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedIndexCreateRequest {
    pub field_name: String,
    pub index_type: EncryptedIndexType,
}
