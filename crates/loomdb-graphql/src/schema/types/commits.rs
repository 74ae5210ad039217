//! Commit (document history) types.

use loomdb_core::request;

use crate::gql::{Enum, Field, InputObject, InputValue, Object, TypeRef};

const COMMIT_DESCRIPTION: &str = "Commit represents an individual commit to a MerkleCRDT.";
const HEIGHT_DESCRIPTION: &str = "Height represents the location of the commit in the DAG.";
const CID_DESCRIPTION: &str = "The content identifier of the commit.";
const DOC_ID_DESCRIPTION: &str = "The docID of the document that this commit is for.";
const SCHEMA_VERSION_ID_DESCRIPTION: &str =
    "The schema version id of the document at the time of the commit.";
const FIELD_NAME_DESCRIPTION: &str = "The name of the field that this commit was committed against.";
const DELTA_DESCRIPTION: &str = "The CBOR encoded representation of the delta.";
const LINKS_DESCRIPTION: &str = "Child commits this commit depends on.";
const SIGNATURE_DESCRIPTION: &str = "The signature of the commit.";
const DEPTH_DESCRIPTION: &str =
    "The maximum number of ancestor commits to traverse from the head.";

/// The `Commit` object.
///
/// References `CommitLink` and `Signature`, which must be registered
/// alongside it.
#[must_use]
pub fn commit_object() -> Object {
    Object::new(request::COMMIT_TYPE_NAME)
        .description(COMMIT_DESCRIPTION)
        .field(Field::new("height", TypeRef::named(TypeRef::INT)).description(HEIGHT_DESCRIPTION))
        .field(Field::new("cid", TypeRef::named(TypeRef::STRING)).description(CID_DESCRIPTION))
        .field(Field::new("docID", TypeRef::named(TypeRef::STRING)).description(DOC_ID_DESCRIPTION))
        .field(
            Field::new("schemaVersionId", TypeRef::named(TypeRef::STRING))
                .description(SCHEMA_VERSION_ID_DESCRIPTION),
        )
        .field(
            Field::new("fieldName", TypeRef::named(TypeRef::STRING))
                .description(FIELD_NAME_DESCRIPTION),
        )
        .field(Field::new("delta", TypeRef::named(TypeRef::STRING)).description(DELTA_DESCRIPTION))
        .field(
            Field::new("links", TypeRef::named_list(request::COMMIT_LINK_TYPE_NAME))
                .description(LINKS_DESCRIPTION),
        )
        .field(
            Field::new("signature", TypeRef::named(request::SIGNATURE_TYPE_NAME))
                .description(SIGNATURE_DESCRIPTION),
        )
        .field(
            Field::new(request::COUNT_FIELD_NAME, TypeRef::named(TypeRef::INT))
                .description(super::COUNT_FIELD_DESCRIPTION)
                .arg(InputValue::new(
                    request::FIELD_ARG_NAME,
                    TypeRef::named("commitCountFieldArg"),
                )),
        )
}

/// The enum naming the countable `Commit` fields.
#[must_use]
pub fn commit_count_field_arg() -> Enum {
    Enum::new("commitCountFieldArg")
        .description(super::COUNT_FIELD_DESCRIPTION)
        .item_described("links", LINKS_DESCRIPTION)
}

/// A named DAG link between commits.
#[must_use]
pub fn commit_link_object() -> Object {
    Object::new(request::COMMIT_LINK_TYPE_NAME)
        .description(LINKS_DESCRIPTION)
        .field(Field::new("name", TypeRef::named(TypeRef::STRING)))
        .field(Field::new("cid", TypeRef::named(TypeRef::STRING)))
}

/// The commit signature object.
#[must_use]
pub fn signature_object() -> Object {
    Object::new(request::SIGNATURE_TYPE_NAME)
        .description(SIGNATURE_DESCRIPTION)
        .field(
            Field::new("type", TypeRef::named(TypeRef::STRING))
                .description("The signature algorithm identifier."),
        )
        .field(
            Field::new("identity", TypeRef::named(TypeRef::STRING))
                .description("The identity of the signer."),
        )
        .field(
            Field::new("value", TypeRef::named(TypeRef::STRING))
                .description("The signature bytes."),
        )
}

/// The order input for `commits` queries.
#[must_use]
pub fn commits_order_arg() -> InputObject {
    InputObject::new("commitsOrderArg")
        .description(super::ORDER_ARG_DESCRIPTION)
        .field(InputValue::new("height", TypeRef::named("Ordering")).description(HEIGHT_DESCRIPTION))
        .field(InputValue::new("cid", TypeRef::named("Ordering")).description(CID_DESCRIPTION))
        .field(InputValue::new("docID", TypeRef::named("Ordering")).description(DOC_ID_DESCRIPTION))
}

/// The enum naming the groupable `commits` fields.
#[must_use]
pub fn commit_fields_enum() -> Enum {
    Enum::new("commitFields")
        .item_described("height", HEIGHT_DESCRIPTION)
        .item_described("cid", CID_DESCRIPTION)
        .item_described("docID", DOC_ID_DESCRIPTION)
        .item_described("fieldName", FIELD_NAME_DESCRIPTION)
}

/// The root `commits` query field.
#[must_use]
pub fn commits_query_field() -> Field {
    Field::new("commits", TypeRef::named_list(request::COMMIT_TYPE_NAME))
        .description("Returns a set of commits matching any provided criteria.")
        .arg(InputValue::new(request::DOC_ID_ARG_NAME, TypeRef::named(TypeRef::ID)))
        .arg(InputValue::new(request::FIELD_NAME_ARG_NAME, TypeRef::named(TypeRef::STRING)))
        .arg(
            InputValue::new(request::ORDER_CLAUSE, TypeRef::named_list("commitsOrderArg"))
                .description(super::ORDER_ARG_DESCRIPTION),
        )
        .arg(InputValue::new(request::CID_ARG_NAME, TypeRef::named(TypeRef::ID)))
        .arg(
            InputValue::new(request::GROUP_BY_CLAUSE, TypeRef::named_nn_list("commitFields"))
                .description(super::GROUP_BY_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(super::LIMIT_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(super::OFFSET_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::DEPTH_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(DEPTH_DESCRIPTION),
        )
}

/// The root `latestCommits` query field.
#[must_use]
pub fn latest_commits_query_field() -> Field {
    Field::new("latestCommits", TypeRef::named_list(request::COMMIT_TYPE_NAME))
        .description("Returns the head commits of the given document.")
        .arg(InputValue::new(
            request::DOC_ID_ARG_NAME,
            TypeRef::non_null(TypeRef::named(TypeRef::ID)),
        ))
        .arg(InputValue::new(request::FIELD_NAME_ARG_NAME, TypeRef::named(TypeRef::STRING)))
}
