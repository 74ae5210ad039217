//! Error types for schema compilation and type generation.

use thiserror::Error;

/// Errors raised while compiling a definition document or generating the
/// type graph.
#[derive(Debug, Error)]
pub enum SchemaError {
    // Field-kind resolution.
    #[error("NonNull variants for type are not supported")]
    NonNullNotSupported,

    #[error("NonNull variants for type are not supported (type: {type_name})")]
    NonNullForTypeNotSupported { type_name: String },

    #[error("field type is not specified (object: {object_name}, field: {field_name})")]
    FieldTypeNotSpecified {
        object_name: String,
        field_name: String,
    },

    #[error("no type found given name (type: {type_name})")]
    TypeNotFound { type_name: String },

    #[error("duplicate field (object: {object_name}, field: {field_name})")]
    DuplicateField {
        object_name: String,
        field_name: String,
    },

    // Directive arguments.
    #[error("invalid argument for directive (directive: {directive}, arg: {arg})")]
    InvalidDirectiveArgument { directive: String, arg: String },

    #[error("unknown argument for directive (directive: {directive}, arg: {arg})")]
    UnknownDirectiveArgument { directive: String, arg: String },

    // Index directives.
    #[error("index with invalid arg")]
    IndexInvalidArgument,

    #[error("index with unknown arg (arg: {arg})")]
    IndexUnknownArgument { arg: String },

    #[error("index name should start with a letter or an underscore (name: {name})")]
    IndexInvalidName { name: String },

    #[error("index missing fields")]
    IndexMissingFields,

    #[error("invalid encrypted index type (type: {type_name})")]
    InvalidEncryptedIndexType { type_name: String },

    // Default values.
    #[error("default value is not allowed for this field kind (field: {field_name}, kind: {kind})")]
    DefaultValueNotAllowed { field_name: String, kind: String },

    #[error("default value type must match field type (field: {field_name}, arg: {arg})")]
    DefaultValueInvalidArgument { field_name: String, arg: String },

    #[error("default value must specify exactly one argument (field: {field_name})")]
    DefaultValueOneArgument { field_name: String },

    // Constraints.
    #[error("size constraints can only be applied to array fields (field: {field_name}, kind: {kind})")]
    ConstraintsNotSupported { field_name: String, kind: String },

    // Registry bookkeeping.
    #[error("schema type already exists (type: {type_name})")]
    TypeAlreadyExists { type_name: String },

    #[error("mutation input type already exists (type: {type_name})")]
    MutationInputTypeAlreadyExist { type_name: String },

    #[error("object not found whilst executing fields thunk (type: {type_name})")]
    ObjectNotFoundDuringThunk { type_name: String },

    #[error("aggregate target not found (host: {host_name}, target: {target_name})")]
    AggregateTargetNotFound {
        host_name: String,
        target_name: String,
    },

    // CRDT assignment, raised by the descriptor layer.
    #[error(transparent)]
    Core(#[from] loomdb_core::CoreError),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
