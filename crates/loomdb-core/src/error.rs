//! Error types for the core descriptor crate.

use thiserror::Error;

/// Errors raised while validating descriptors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid CRDT type: {crdt_type} (field: {field_name})")]
    InvalidCrdtType {
        field_name: String,
        crdt_type: String,
    },

    #[error("CRDT type {ctype} can't be assigned to field kind {kind}")]
    CrdtKindMismatch { ctype: String, kind: String },

    #[error("relation must be defined on both schemas (field: {field_name}, type: {type_name})")]
    RelationMissingField {
        field_name: String,
        type_name: String,
    },

    #[error("relation fields must be the same type (relation: {relation_name})")]
    RelationFieldTypeMismatch { relation_name: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
