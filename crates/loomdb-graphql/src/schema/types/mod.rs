//! Built-in types and the directive grammar.

mod base;
mod commits;

pub use base::operator_blocks;
pub use commits::{
    commit_count_field_arg, commit_fields_enum, commit_link_object, commit_object,
    commits_order_arg, commits_query_field, latest_commits_query_field, signature_object,
};

use crate::gql::{Enum, Scalar};

pub const PRIMARY_DIRECTIVE_LABEL: &str = "primary";

pub const RELATION_DIRECTIVE_LABEL: &str = "relation";
pub const RELATION_DIRECTIVE_PROP_NAME: &str = "name";

pub const CRDT_DIRECTIVE_LABEL: &str = "crdt";
pub const CRDT_DIRECTIVE_PROP_TYPE: &str = "type";

pub const CONSTRAINTS_DIRECTIVE_LABEL: &str = "constraints";
pub const CONSTRAINTS_DIRECTIVE_PROP_SIZE: &str = "size";

pub const EMBEDDING_DIRECTIVE_LABEL: &str = "embedding";
pub const EMBEDDING_DIRECTIVE_PROP_PROVIDER: &str = "provider";
pub const EMBEDDING_DIRECTIVE_PROP_MODEL: &str = "model";
pub const EMBEDDING_DIRECTIVE_PROP_URL: &str = "url";
pub const EMBEDDING_DIRECTIVE_PROP_FIELDS: &str = "fields";
pub const EMBEDDING_DIRECTIVE_PROP_TEMPLATE: &str = "template";

pub const POLICY_DIRECTIVE_LABEL: &str = "policy";
pub const POLICY_DIRECTIVE_PROP_ID: &str = "id";
pub const POLICY_DIRECTIVE_PROP_RESOURCE: &str = "resource";

pub const INDEX_DIRECTIVE_LABEL: &str = "index";
pub const INDEX_DIRECTIVE_PROP_NAME: &str = "name";
pub const INDEX_DIRECTIVE_PROP_UNIQUE: &str = "unique";
pub const INDEX_DIRECTIVE_PROP_DIRECTION: &str = "direction";
pub const INDEX_DIRECTIVE_PROP_INCLUDES: &str = "includes";
pub const INCLUDES_PROP_FIELD: &str = "field";
pub const INCLUDES_PROP_DIRECTION: &str = "direction";

pub const ENCRYPTED_INDEX_DIRECTIVE_LABEL: &str = "encryptedIndex";
pub const ENCRYPTED_INDEX_DIRECTIVE_PROP_TYPE: &str = "type";
pub const ENCRYPTED_INDEX_TYPE_EQUALITY: &str = "equality";

pub const DEFAULT_DIRECTIVE_LABEL: &str = "default";
pub const DEFAULT_DIRECTIVE_PROP_STRING: &str = "string";
pub const DEFAULT_DIRECTIVE_PROP_BOOL: &str = "bool";
pub const DEFAULT_DIRECTIVE_PROP_INT: &str = "int";
pub const DEFAULT_DIRECTIVE_PROP_FLOAT: &str = "float";
pub const DEFAULT_DIRECTIVE_PROP_FLOAT32: &str = "float32";
pub const DEFAULT_DIRECTIVE_PROP_FLOAT64: &str = "float64";
pub const DEFAULT_DIRECTIVE_PROP_DATETIME: &str = "dateTime";
pub const DEFAULT_DIRECTIVE_PROP_JSON: &str = "json";
pub const DEFAULT_DIRECTIVE_PROP_BLOB: &str = "blob";

pub const MATERIALIZED_DIRECTIVE_LABEL: &str = "materialized";
pub const MATERIALIZED_DIRECTIVE_PROP_IF: &str = "if";

pub const BRANCHABLE_DIRECTIVE_LABEL: &str = "branchable";
pub const BRANCHABLE_DIRECTIVE_PROP_IF: &str = "if";

pub const FIELD_ORDER_ASC: &str = "ASC";
pub const FIELD_ORDER_DESC: &str = "DESC";

pub const GROUP_BY_ARG_DESCRIPTION: &str =
    "Groups the returned documents by the given set of fields, returning the group contents via the _group field.";
pub const ORDER_ARG_DESCRIPTION: &str =
    "Orders the returned documents by the given set of field orderings.";
pub const LIMIT_ARG_DESCRIPTION: &str =
    "Limits the number of returned documents to the given value.";
pub const OFFSET_ARG_DESCRIPTION: &str =
    "Skips the given number of documents before returning results.";
pub const COUNT_FIELD_DESCRIPTION: &str =
    "Returns the total number of items within the specified child sets.";
pub const SUM_FIELD_DESCRIPTION: &str =
    "Returns the total sum of the specified field values within the specified child sets.";
pub const AVERAGE_FIELD_DESCRIPTION: &str =
    "Returns the average of the specified field values within the specified child sets.";

/// The `Ordering` enum used by order and index arguments.
#[must_use]
pub fn ordering_enum() -> Enum {
    Enum::new("Ordering")
        .item_described(FIELD_ORDER_ASC, "Sort in ascending order.")
        .item_described(FIELD_ORDER_DESC, "Sort in descending order.")
}

/// One of the possible CRDT types.
#[must_use]
pub fn crdt_enum() -> Enum {
    Enum::new("CRDTType")
        .description("One of the possible CRDT types.")
        .item_described("lww", "Last write wins register.")
        .item_described("pncounter", "Positive-negative counter.")
        .item_described("pcounter", "Positive-only counter.")
}

/// Selects the kind of explanation produced by the `@explain` directive.
#[must_use]
pub fn explain_enum() -> Enum {
    Enum::new("ExplainType")
        .description("ExplainType is an enum selecting the type of explanation done by the @explain directive.")
        .item_described("simple", "Dump of the plan graph.")
        .item_described("execute", "Insights gathered by executing the plan graph.")
        .item_described("debug", "Like simple, but with more verbose nodes.")
}

/// The built-in scalar set.
#[must_use]
pub fn default_scalars() -> Vec<Scalar> {
    vec![
        Scalar::new("String"),
        Scalar::new("Int"),
        Scalar::new("Boolean"),
        Scalar::new("ID"),
        Scalar::new("Float32").description("The Float32 scalar type represents an IEEE 754 single-precision value."),
        Scalar::new("Float64").description("The Float64 scalar type represents an IEEE 754 double-precision value."),
        Scalar::new("DateTime").description("An RFC 3339 formatted date-time string."),
        Scalar::new("Blob").description("Arbitrary binary data, hex encoded."),
        Scalar::new("JSON").description("An arbitrary JSON value."),
    ]
}
