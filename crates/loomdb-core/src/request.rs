//! Reserved field and argument names shared between the schema compiler and
//! the query layer.

/// The immutable document identifier field.
pub const DOC_ID_FIELD_NAME: &str = "_docID";
/// Head commit(s) of a document.
pub const VERSION_FIELD_NAME: &str = "_version";
/// Soft-deletion marker.
pub const DELETED_FIELD_NAME: &str = "_deleted";
/// Group child-record accessor (paired with `groupBy`).
pub const GROUP_FIELD_NAME: &str = "_group";
/// Count aggregate.
pub const COUNT_FIELD_NAME: &str = "_count";
/// Sum aggregate.
pub const SUM_FIELD_NAME: &str = "_sum";
/// Average aggregate.
pub const AVERAGE_FIELD_NAME: &str = "_avg";

pub const DOC_ID_ARG_NAME: &str = "docID";
pub const DOC_IDS_ARG_NAME: &str = "docIDs";
pub const CID_ARG_NAME: &str = "cid";
pub const FILTER_CLAUSE: &str = "filter";
pub const GROUP_BY_CLAUSE: &str = "groupBy";
pub const ORDER_CLAUSE: &str = "order";
pub const LIMIT_CLAUSE: &str = "limit";
pub const OFFSET_CLAUSE: &str = "offset";
pub const DEPTH_CLAUSE: &str = "depth";
pub const SHOW_DELETED_ARG_NAME: &str = "showDeleted";
pub const FIELD_ARG_NAME: &str = "field";
pub const FIELD_NAME_ARG_NAME: &str = "fieldName";
pub const INPUT_ARG_NAME: &str = "input";
pub const INPUTS_ARG_NAME: &str = "inputs";
pub const ENCRYPT_DOC_ARG_NAME: &str = "encrypt";
pub const ENCRYPT_FIELDS_ARG_NAME: &str = "encryptFields";

/// Name of the commit object type in the generated schema.
pub const COMMIT_TYPE_NAME: &str = "Commit";
/// Name of the commit-link object type in the generated schema.
pub const COMMIT_LINK_TYPE_NAME: &str = "CommitLink";
/// Name of the commit signature object type in the generated schema.
pub const SIGNATURE_TYPE_NAME: &str = "Signature";

/// Returns true for field names reserved by the system.
#[must_use]
pub fn is_reserved_field(name: &str) -> bool {
    matches!(
        name,
        DOC_ID_FIELD_NAME
            | VERSION_FIELD_NAME
            | DELETED_FIELD_NAME
            | GROUP_FIELD_NAME
            | COUNT_FIELD_NAME
            | SUM_FIELD_NAME
            | AVERAGE_FIELD_NAME
    )
}

/// Returns true for the generated aggregate field names.
#[must_use]
pub fn is_aggregate_field(name: &str) -> bool {
    matches!(name, COUNT_FIELD_NAME | SUM_FIELD_NAME | AVERAGE_FIELD_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_fields() {
        assert!(is_reserved_field(DOC_ID_FIELD_NAME));
        assert!(is_reserved_field(GROUP_FIELD_NAME));
        assert!(is_reserved_field(SUM_FIELD_NAME));
        assert!(!is_reserved_field("name"));
        assert!(!is_reserved_field("_docIDs"));
    }

    #[test]
    fn test_aggregates_are_reserved() {
        for name in [COUNT_FIELD_NAME, SUM_FIELD_NAME, AVERAGE_FIELD_NAME] {
            assert!(is_aggregate_field(name));
            assert!(is_reserved_field(name));
        }
        assert!(!is_aggregate_field(DOC_ID_FIELD_NAME));
    }
}
