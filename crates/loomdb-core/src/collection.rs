//! Collection and schema descriptors.
//!
//! A [`Collection`] pairs a local [`CollectionVersion`] with the global
//! [`Schema`] it hosts. The version carries node-local concerns (indexes,
//! policy, materialization) while the schema carries the replicated field
//! set that document identifiers and CRDT merging are derived from.

use serde::{Deserialize, Serialize};

use crate::crdt::CType;
use crate::embedding::VectorEmbeddingDescription;
use crate::index::{EncryptedIndexCreateRequest, IndexDescription};
use crate::kind::FieldKind;
use crate::policy::PolicyDescription;

/// A complete collection definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub version: CollectionVersion,
    pub schema: Schema,
}

impl Collection {
    /// The name the collection is addressed by.
    ///
    /// Falls back to the schema name for embedded (schema-only) collections,
    /// which have no version name of their own.
    #[must_use]
    pub fn name(&self) -> &str {
        self.version.name.as_deref().unwrap_or(&self.schema.name)
    }

    /// Returns true for embedded collections, which only exist as a schema
    /// hosted inside other collections and cannot be queried directly.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.version.name.is_none()
    }
}

/// The local, mutable half of a collection definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionVersion {
    /// The collection name. `None` for embedded collections.
    pub name: Option<String>,
    /// Optional access-control policy binding.
    pub policy: Option<PolicyDescription>,
    /// Local fields, including relation fields that are not part of the
    /// replicated schema.
    pub fields: Vec<CollectionFieldDescription>,
    /// Secondary indexes to create with the collection.
    pub indexes: Vec<IndexDescription>,
    /// Encrypted indexes to create with the collection.
    pub encrypted_indexes: Vec<EncryptedIndexCreateRequest>,
    /// Vector-embedding generation configuration.
    pub vector_embeddings: Vec<VectorEmbeddingDescription>,
    /// Whether results are cached (views). Defaults to true.
    pub is_materialized: bool,
    /// Whether the collection supports branching history.
    pub is_branchable: bool,
    /// Whether the collection accepts reads and writes.
    pub is_active: bool,
    /// Sources this collection derives its data from, if it is a view.
    pub query_sources: Vec<QuerySource>,
}

impl Default for CollectionVersion {
    fn default() -> Self {
        Self {
            name: None,
            policy: None,
            fields: Vec::new(),
            indexes: Vec::new(),
            encrypted_indexes: Vec::new(),
            vector_embeddings: Vec::new(),
            is_materialized: true,
            is_branchable: false,
            is_active: true,
            query_sources: Vec::new(),
        }
    }
}

impl CollectionVersion {
    /// Returns true if this collection is backed by query sources rather
    /// than its own document store.
    #[must_use]
    pub fn is_view(&self) -> bool {
        !self.query_sources.is_empty()
    }

    /// Finds the field on this collection that participates in the named
    /// relation, excluding the named host field and any relation id fields.
    #[must_use]
    pub fn get_field_by_relation(
        &self,
        relation_name: &str,
        host_name: &str,
        host_field_name: &str,
    ) -> Option<&CollectionFieldDescription> {
        self.fields.iter().find(|field| {
            field.relation_name.as_deref() == Some(relation_name)
                && !(self.name.as_deref() == Some(host_name) && field.name == host_field_name)
                && field.kind != Some(FieldKind::DocID)
        })
    }
}

/// A merged view of a field, combining collection and schema level data.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
}

impl Collection {
    /// Returns the full field set with kinds resolved.
    ///
    /// Collection-level fields without a local kind (plain scalars) take
    /// their kind from the schema. Embedded collections expose their schema
    /// fields directly.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldDefinition> {
        if self.is_embedded() {
            return self
                .schema
                .fields
                .iter()
                .map(|field| FieldDefinition {
                    name: field.name.clone(),
                    kind: field.kind.clone(),
                })
                .collect();
        }

        self.version
            .fields
            .iter()
            .map(|field| {
                let kind = field.kind.clone().unwrap_or_else(|| {
                    self.schema
                        .get_field_by_name(&field.name)
                        .map_or(FieldKind::None, |f| f.kind.clone())
                });
                FieldDefinition {
                    name: field.name.clone(),
                    kind,
                }
            })
            .collect()
    }
}

/// A field local to a collection version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFieldDescription {
    pub name: String,
    /// The resolved kind. `None` for fields that only exist on the schema.
    pub kind: Option<FieldKind>,
    /// The relation this field participates in, for object and relation id
    /// fields.
    pub relation_name: Option<String>,
    /// Default value applied on document creation.
    pub default_value: Option<serde_json::Value>,
    /// Fixed array size constraint, from `@constraints(size: ...)`.
    pub size: Option<u32>,
}

/// The replicated, immutable half of a collection definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<SchemaFieldDescription>,
}

impl Schema {
    #[must_use]
    pub fn get_field_by_name(&self, name: &str) -> Option<&SchemaFieldDescription> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A field of the replicated schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFieldDescription {
    pub name: String,
    pub kind: FieldKind,
    /// The CRDT used to merge concurrent writes.
    pub typ: CType,
}

impl Default for SchemaFieldDescription {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: FieldKind::None,
            typ: CType::default(),
        }
    }
}

/// A data source backing a view collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySource {
    /// The source request, stored as its string form.
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name_falls_back_to_schema() {
        let named = Collection {
            version: CollectionVersion {
                name: Some("User".to_string()),
                ..Default::default()
            },
            schema: Schema {
                name: "User".to_string(),
                fields: Vec::new(),
            },
        };
        assert_eq!(named.name(), "User");
        assert!(!named.is_embedded());

        let embedded = Collection {
            version: CollectionVersion::default(),
            schema: Schema {
                name: "Address".to_string(),
                fields: Vec::new(),
            },
        };
        assert_eq!(embedded.name(), "Address");
        assert!(embedded.is_embedded());
    }

    #[test]
    fn test_get_field_by_relation_skips_host_and_id_fields() {
        let version = CollectionVersion {
            name: Some("User".to_string()),
            fields: vec![
                CollectionFieldDescription {
                    name: "address".to_string(),
                    kind: Some(FieldKind::Object {
                        name: "Address".to_string(),
                        is_array: false,
                    }),
                    relation_name: Some("address_user".to_string()),
                    ..Default::default()
                },
                CollectionFieldDescription {
                    name: "address_id".to_string(),
                    kind: Some(FieldKind::DocID),
                    relation_name: Some("address_user".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        // Looking from the other side of the relation finds the object field.
        let found = version
            .get_field_by_relation("address_user", "Address", "user")
            .expect("relation field");
        assert_eq!(found.name, "address");

        // Looking from the field itself finds nothing.
        assert!(
            version
                .get_field_by_relation("address_user", "User", "address")
                .is_none()
        );
    }

    #[test]
    fn test_version_defaults() {
        let version = CollectionVersion::default();
        assert!(version.is_materialized);
        assert!(!version.is_branchable);
        assert!(version.is_active);
        assert!(!version.is_view());
    }
}
