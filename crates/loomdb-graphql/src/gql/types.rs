//! Type-graph node definitions.
//!
//! Objects and input objects may carry a deferred field thunk instead of a
//! concrete field map. Thunks receive the schema so they can look up (and,
//! where needed, register) other types; they are forced by
//! [`Schema::resolve_types`](super::Schema::resolve_types).

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::gql::Schema;
use crate::gql::type_ref::TypeRef;

pub type FieldsThunk = Box<dyn FnOnce(&mut Schema) -> Result<IndexMap<String, Field>, SchemaError>>;
pub type InputFieldsThunk =
    Box<dyn FnOnce(&mut Schema) -> Result<IndexMap<String, InputValue>, SchemaError>>;

/// An argument or input-object field.
#[derive(Debug, Clone)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}

impl InputValue {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An output-object field with optional arguments.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub args: IndexMap<String, InputValue>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            args: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: InputValue) -> Self {
        self.args.insert(arg.name.clone(), arg);
        self
    }
}

/// An output object type.
pub struct Object {
    pub name: String,
    pub description: Option<String>,
    fields: IndexMap<String, Field>,
    thunk: Option<FieldsThunk>,
}

impl Object {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            thunk: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Defers the field map until [`Schema::resolve_types`] runs.
    #[must_use]
    pub fn fields_thunk(
        mut self,
        thunk: impl FnOnce(&mut Schema) -> Result<IndexMap<String, Field>, SchemaError> + 'static,
    ) -> Self {
        self.thunk = Some(Box::new(thunk));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Adds or replaces a field on an already-built object.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Returns true once the field map is concrete.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.thunk.is_none()
    }

    pub(crate) fn take_thunk(&mut self) -> Option<FieldsThunk> {
        self.thunk.take()
    }

    pub(crate) fn set_fields(&mut self, fields: IndexMap<String, Field>) {
        self.fields = fields;
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("pending", &self.thunk.is_some())
            .finish()
    }
}

/// An input object type.
pub struct InputObject {
    pub name: String,
    pub description: Option<String>,
    fields: IndexMap<String, InputValue>,
    thunk: Option<InputFieldsThunk>,
}

impl InputObject {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
            thunk: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: InputValue) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Defers the field map until [`Schema::resolve_types`] runs.
    #[must_use]
    pub fn fields_thunk(
        mut self,
        thunk: impl FnOnce(&mut Schema) -> Result<IndexMap<String, InputValue>, SchemaError>
        + 'static,
    ) -> Self {
        self.thunk = Some(Box::new(thunk));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, InputValue> {
        &self.fields
    }

    pub fn add_field(&mut self, field: InputValue) {
        self.fields.insert(field.name.clone(), field);
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.thunk.is_none()
    }

    pub(crate) fn take_thunk(&mut self) -> Option<InputFieldsThunk> {
        self.thunk.take()
    }

    pub(crate) fn set_fields(&mut self, fields: IndexMap<String, InputValue>) {
        self.fields = fields;
    }
}

impl std::fmt::Debug for InputObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputObject")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("pending", &self.thunk.is_some())
            .finish()
    }
}

/// A single enum value.
#[derive(Debug, Clone)]
pub struct EnumItem {
    pub name: String,
    pub description: Option<String>,
}

/// An enum type.
#[derive(Debug, Clone)]
pub struct Enum {
    pub name: String,
    pub description: Option<String>,
    items: IndexMap<String, EnumItem>,
}

impl Enum {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            items: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn item(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.items.insert(
            name.clone(),
            EnumItem {
                name,
                description: None,
            },
        );
        self
    }

    #[must_use]
    pub fn item_described(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        self.items.insert(
            name.clone(),
            EnumItem {
                name,
                description: Some(description.into()),
            },
        );
        self
    }

    #[must_use]
    pub fn items(&self) -> &IndexMap<String, EnumItem> {
        &self.items
    }

    #[must_use]
    pub fn has_item(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }
}

/// A scalar type.
#[derive(Debug, Clone)]
pub struct Scalar {
    pub name: String,
    pub description: Option<String>,
}

impl Scalar {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Any named type held by the schema.
#[derive(Debug)]
pub enum NamedType {
    Object(Object),
    InputObject(InputObject),
    Enum(Enum),
    Scalar(Scalar),
}

impl NamedType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(o) => &o.name,
            Self::InputObject(o) => &o.name,
            Self::Enum(e) => &e.name,
            Self::Scalar(s) => &s.name,
        }
    }

    /// Leaf types carry no sub-selections.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_input_object(&self) -> Option<&InputObject> {
        match self {
            Self::InputObject(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_enum(&self) -> Option<&Enum> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Object> for NamedType {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<InputObject> for NamedType {
    fn from(value: InputObject) -> Self {
        Self::InputObject(value)
    }
}

impl From<Enum> for NamedType {
    fn from(value: Enum) -> Self {
        Self::Enum(value)
    }
}

impl From<Scalar> for NamedType {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}
