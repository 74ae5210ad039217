//! A minimal dynamic GraphQL type system.
//!
//! The schema compiler needs a type catalog it can mutate across multiple
//! generation passes, with deferred field bodies for forward and cyclic
//! references. Types reference each other by name through [`TypeRef`], and
//! pending bodies are forced explicitly via [`Schema::resolve_types`].

mod schema;
mod type_ref;
mod types;

pub use schema::Schema;
pub use type_ref::TypeRef;
pub use types::{
    Enum, EnumItem, Field, FieldsThunk, InputFieldsThunk, InputObject, InputValue, NamedType,
    Object, Scalar,
};
