//! Field kinds.
//!
//! A [`FieldKind`] is the resolved, storage-facing type of a collection
//! field. Kinds are resolved once from the AST at schema-build time and are
//! never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a collection field.
///
/// Scalar kinds come in three shapes: the nillable scalar itself, an array
/// of non-nillable values, and an array of nillable values. `Object` kinds
/// reference another collection by schema name and carry the relation
/// arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Unresolved/absent kind. Only produced on error paths.
    None,
    /// The document identifier (`ID` in SDL).
    DocID,

    NillableBool,
    BoolArray,
    NillableBoolArray,

    NillableInt,
    IntArray,
    NillableIntArray,

    NillableFloat32,
    Float32Array,
    NillableFloat32Array,

    NillableFloat64,
    Float64Array,
    NillableFloat64Array,

    NillableDateTime,
    DateTimeArray,
    NillableDateTimeArray,

    NillableString,
    StringArray,
    NillableStringArray,

    NillableBlob,
    BlobArray,
    NillableBlobArray,

    NillableJson,
    JsonArray,
    NillableJsonArray,

    /// A reference to another collection (a relation), by schema name.
    Object { name: String, is_array: bool },
}

impl FieldKind {
    /// Returns true if this kind references another collection.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object { .. })
    }

    /// Returns true if this kind holds multiple values.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(
            self,
            Self::BoolArray
                | Self::NillableBoolArray
                | Self::IntArray
                | Self::NillableIntArray
                | Self::Float32Array
                | Self::NillableFloat32Array
                | Self::Float64Array
                | Self::NillableFloat64Array
                | Self::DateTimeArray
                | Self::NillableDateTimeArray
                | Self::StringArray
                | Self::NillableStringArray
                | Self::BlobArray
                | Self::NillableBlobArray
                | Self::JsonArray
                | Self::NillableJsonArray
                | Self::Object { is_array: true, .. }
        )
    }

    /// The referenced collection name for object kinds, empty otherwise.
    #[must_use]
    pub fn underlying(&self) -> &str {
        match self {
            Self::Object { name, .. } => name,
            _ => "",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::DocID => "ID",
            Self::NillableBool => "Boolean",
            Self::BoolArray => "[Boolean!]",
            Self::NillableBoolArray => "[Boolean]",
            Self::NillableInt => "Int",
            Self::IntArray => "[Int!]",
            Self::NillableIntArray => "[Int]",
            Self::NillableFloat32 => "Float32",
            Self::Float32Array => "[Float32!]",
            Self::NillableFloat32Array => "[Float32]",
            Self::NillableFloat64 => "Float64",
            Self::Float64Array => "[Float64!]",
            Self::NillableFloat64Array => "[Float64]",
            Self::NillableDateTime => "DateTime",
            Self::DateTimeArray => "[DateTime!]",
            Self::NillableDateTimeArray => "[DateTime]",
            Self::NillableString => "String",
            Self::StringArray => "[String!]",
            Self::NillableStringArray => "[String]",
            Self::NillableBlob => "Blob",
            Self::BlobArray => "[Blob!]",
            Self::NillableBlobArray => "[Blob]",
            Self::NillableJson => "JSON",
            Self::JsonArray => "[JSON!]",
            Self::NillableJsonArray => "[JSON]",
            Self::Object { name, is_array } => {
                return if *is_array {
                    write!(f, "[{name}]")
                } else {
                    write!(f, "{name}")
                };
            }
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_predicates() {
        let single = FieldKind::Object {
            name: "Author".to_string(),
            is_array: false,
        };
        let many = FieldKind::Object {
            name: "Book".to_string(),
            is_array: true,
        };

        assert!(single.is_object());
        assert!(!single.is_array());
        assert_eq!(single.underlying(), "Author");

        assert!(many.is_object());
        assert!(many.is_array());
        assert_eq!(many.underlying(), "Book");
    }

    #[test]
    fn test_scalar_array_predicates() {
        assert!(FieldKind::NillableIntArray.is_array());
        assert!(FieldKind::IntArray.is_array());
        assert!(!FieldKind::NillableInt.is_array());
        assert!(!FieldKind::NillableInt.is_object());
        assert_eq!(FieldKind::NillableInt.underlying(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldKind::NillableBoolArray.to_string(), "[Boolean]");
        assert_eq!(FieldKind::StringArray.to_string(), "[String!]");
        assert_eq!(
            FieldKind::Object {
                name: "Author".to_string(),
                is_array: false
            }
            .to_string(),
            "Author"
        );
    }
}
