//! Static field-kind mappings and generated-surface descriptions.

use loomdb_core::{CType, FieldKind};

use crate::gql::TypeRef;

/// Maps a resolved field kind to its GraphQL type reference.
///
/// Object kinds are not handled here; their type is looked up in the
/// registry by the type generator.
#[must_use]
pub fn field_kind_type_ref(kind: &FieldKind) -> Option<TypeRef> {
    let ty = match kind {
        FieldKind::DocID => TypeRef::named(TypeRef::ID),
        FieldKind::NillableBool => TypeRef::named(TypeRef::BOOLEAN),
        FieldKind::BoolArray => TypeRef::named_nn_list(TypeRef::BOOLEAN),
        FieldKind::NillableBoolArray => TypeRef::named_list(TypeRef::BOOLEAN),
        FieldKind::NillableInt => TypeRef::named(TypeRef::INT),
        FieldKind::IntArray => TypeRef::named_nn_list(TypeRef::INT),
        FieldKind::NillableIntArray => TypeRef::named_list(TypeRef::INT),
        FieldKind::NillableFloat32 => TypeRef::named(TypeRef::FLOAT32),
        FieldKind::Float32Array => TypeRef::named_nn_list(TypeRef::FLOAT32),
        FieldKind::NillableFloat32Array => TypeRef::named_list(TypeRef::FLOAT32),
        FieldKind::NillableFloat64 => TypeRef::named(TypeRef::FLOAT64),
        FieldKind::Float64Array => TypeRef::named_nn_list(TypeRef::FLOAT64),
        FieldKind::NillableFloat64Array => TypeRef::named_list(TypeRef::FLOAT64),
        FieldKind::NillableDateTime => TypeRef::named(TypeRef::DATETIME),
        FieldKind::DateTimeArray => TypeRef::named_nn_list(TypeRef::DATETIME),
        FieldKind::NillableDateTimeArray => TypeRef::named_list(TypeRef::DATETIME),
        FieldKind::NillableString => TypeRef::named(TypeRef::STRING),
        FieldKind::StringArray => TypeRef::named_nn_list(TypeRef::STRING),
        FieldKind::NillableStringArray => TypeRef::named_list(TypeRef::STRING),
        FieldKind::NillableBlob => TypeRef::named(TypeRef::BLOB),
        FieldKind::BlobArray => TypeRef::named_nn_list(TypeRef::BLOB),
        FieldKind::NillableBlobArray => TypeRef::named_list(TypeRef::BLOB),
        FieldKind::NillableJson => TypeRef::named(TypeRef::JSON),
        FieldKind::JsonArray => TypeRef::named_nn_list(TypeRef::JSON),
        FieldKind::NillableJsonArray => TypeRef::named_list(TypeRef::JSON),
        FieldKind::None | FieldKind::Object { .. } => return None,
    };
    Some(ty)
}

/// The merge strategy assigned to fields that do not declare one.
#[must_use]
pub fn default_crdt_for_field_kind(kind: &FieldKind) -> CType {
    match kind {
        // Object kinds are resolved separately by the collection builder.
        FieldKind::None | FieldKind::Object { .. } => CType::NoneCrdt,
        _ => CType::LwwRegister,
    }
}

pub const DOC_ID_FIELD_DESCRIPTION: &str =
    "The immutable primary key (docID) value for this document.";
pub const GROUP_FIELD_DESCRIPTION: &str =
    "The group field returns the set of child records belonging to the group. It must be used alongside a groupBy argument on the parent selector.";
pub const VERSION_FIELD_DESCRIPTION: &str = "Returns the head commit for this document.";
pub const DELETED_FIELD_DESCRIPTION: &str =
    "Indicates whether this document has been deleted.";

pub const DOC_ID_ARG_DESCRIPTION: &str =
    "An optional docID parameter for this field. Only the document with the given docID will be returned.";
pub const DOC_IDS_ARG_DESCRIPTION: &str =
    "An optional set of docIDs for this field. Only documents with a matching docID will be returned.";
pub const CID_ARG_DESCRIPTION: &str =
    "An optional commit ID. If given, the document is returned at the state it was in at that commit.";
pub const SHOW_DELETED_ARG_DESCRIPTION: &str =
    "If true, deleted documents may be returned. Propagates down through child selects.";
pub const SELECT_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter for this select. Only documents matching the given criteria will be returned.";
pub const SINGLE_FIELD_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter for this join. If the related record does not match, this field will be null.";
pub const LIST_FIELD_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter for this join. If no related records match, this field will be empty.";
pub const AGGREGATE_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter for this aggregate. Only documents matching the given criteria will be aggregated.";

pub const AND_OPERATOR_DESCRIPTION: &str =
    "The and operator, matches if all of the given sub-blocks match.";
pub const OR_OPERATOR_DESCRIPTION: &str =
    "The or operator, matches if any of the given sub-blocks match.";
pub const NOT_OPERATOR_DESCRIPTION: &str =
    "The negation operator, matches if the given sub-block does not match.";

pub const UPDATE_ID_ARG_DESCRIPTION: &str =
    "An optional docID limiting the update to the document with a matching docID. If none matches, the operation succeeds but updates nothing.";
pub const UPDATE_IDS_ARG_DESCRIPTION: &str =
    "An optional set of docIDs limiting the update to documents with a matching docID. If none match, the operation succeeds but updates nothing.";
pub const UPDATE_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter limiting the update to documents matching the given criteria. If none match, the operation succeeds but updates nothing.";
pub const DELETE_ID_ARG_DESCRIPTION: &str =
    "An optional docID limiting the delete to the document with a matching docID. If none matches, the operation succeeds but deletes nothing.";
pub const DELETE_IDS_ARG_DESCRIPTION: &str =
    "An optional set of docIDs limiting the delete to documents with a matching docID. If none match, the operation succeeds but deletes nothing.";
pub const DELETE_FILTER_ARG_DESCRIPTION: &str =
    "An optional filter limiting the delete to documents matching the given criteria. If none match, the operation succeeds but deletes nothing.";

pub const CREATE_DOCUMENT_DESCRIPTION: &str =
    "Creates one or more documents of this type using the data provided.";
pub const UPDATE_DOCUMENTS_DESCRIPTION: &str =
    "Updates documents matching any provided criteria using the data provided.";
pub const DELETE_DOCUMENTS_DESCRIPTION: &str =
    "Deletes documents matching any provided criteria.";
pub const ENCRYPT_ARG_DESCRIPTION: &str =
    "If true, all field values of the input document(s) will be encrypted with a generated symmetric key.";
pub const ENCRYPT_FIELDS_ARG_DESCRIPTION: &str =
    "An optional list of individual fields that should be encrypted, each with its own generated key.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            field_kind_type_ref(&FieldKind::NillableInt),
            Some(TypeRef::named("Int"))
        );
        assert_eq!(
            field_kind_type_ref(&FieldKind::StringArray),
            Some(TypeRef::named_nn_list("String"))
        );
        assert_eq!(
            field_kind_type_ref(&FieldKind::NillableFloat64),
            Some(TypeRef::named("Float64"))
        );
        assert_eq!(
            field_kind_type_ref(&FieldKind::Object {
                name: "User".to_string(),
                is_array: false
            }),
            None
        );
    }

    #[test]
    fn test_default_crdt_is_lww() {
        assert_eq!(
            default_crdt_for_field_kind(&FieldKind::DocID),
            CType::LwwRegister
        );
        assert_eq!(
            default_crdt_for_field_kind(&FieldKind::NillableStringArray),
            CType::LwwRegister
        );
    }
}
