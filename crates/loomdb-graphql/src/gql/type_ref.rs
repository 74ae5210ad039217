//! Name-based type references.

use std::fmt;

/// A reference to a type in the schema, by name.
///
/// References are purely nominal so that the type graph may contain cycles
/// and forward references. The referenced type only needs to exist by the
/// time the schema is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub const STRING: &'static str = "String";
    pub const INT: &'static str = "Int";
    pub const BOOLEAN: &'static str = "Boolean";
    pub const ID: &'static str = "ID";
    pub const FLOAT32: &'static str = "Float32";
    pub const FLOAT64: &'static str = "Float64";
    pub const DATETIME: &'static str = "DateTime";
    pub const BLOB: &'static str = "Blob";
    pub const JSON: &'static str = "JSON";

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(of: TypeRef) -> Self {
        Self::List(Box::new(of))
    }

    #[must_use]
    pub fn non_null(of: TypeRef) -> Self {
        Self::NonNull(Box::new(of))
    }

    /// `[T]`
    #[must_use]
    pub fn named_list(name: impl Into<String>) -> Self {
        Self::list(Self::named(name))
    }

    /// `[T!]`
    #[must_use]
    pub fn named_nn_list(name: impl Into<String>) -> Self {
        Self::list(Self::non_null(Self::named(name)))
    }

    /// The name of the innermost named type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(of) | Self::NonNull(of) => of.name(),
        }
    }

    /// Returns true if the outermost wrapper is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns true if the outermost wrapper is a non-null.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The element type of a list reference.
    #[must_use]
    pub fn list_item(&self) -> Option<&TypeRef> {
        match self {
            Self::List(of) => Some(of),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(of) => write!(f, "[{of}]"),
            Self::NonNull(of) => write!(f, "{of}!"),
        }
    }
}
