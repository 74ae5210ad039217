//! The mutable type catalog.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::SchemaError;
use crate::gql::type_ref::TypeRef;
use crate::gql::types::{Enum, InputObject, NamedType, Object};

/// The complete type graph, owned by one schema manager per session.
///
/// Types are held in registration order so that thunk resolution and every
/// generation pass are deterministic.
#[derive(Debug, Default)]
pub struct Schema {
    types: IndexMap<String, NamedType>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named type, erroring if the name is already taken.
    pub fn register(&mut self, ty: impl Into<NamedType>) -> Result<(), SchemaError> {
        let ty = ty.into();
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(SchemaError::TypeAlreadyExists { type_name: name });
        }
        trace!(type_name = %name, "registering type");
        self.types.insert(name, ty);
        Ok(())
    }

    /// Registers a type, replacing any existing definition with the same name.
    pub fn replace(&mut self, ty: impl Into<NamedType>) {
        let ty = ty.into();
        self.types.insert(ty.name().to_string(), ty);
    }

    pub fn set_query_type(&mut self, name: impl Into<String>) {
        self.query_type = Some(name.into());
    }

    pub fn set_mutation_type(&mut self, name: impl Into<String>) {
        self.mutation_type = Some(name.into());
    }

    pub fn set_subscription_type(&mut self, name: impl Into<String>) {
        self.subscription_type = Some(name.into());
    }

    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.types.get(name).and_then(NamedType::as_object)
    }

    #[must_use]
    pub fn object_mut(&mut self, name: &str) -> Option<&mut Object> {
        match self.types.get_mut(name) {
            Some(NamedType::Object(o)) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn input_object(&self, name: &str) -> Option<&InputObject> {
        self.types.get(name).and_then(NamedType::as_input_object)
    }

    #[must_use]
    pub fn input_object_mut(&mut self, name: &str) -> Option<&mut InputObject> {
        match self.types.get_mut(name) {
            Some(NamedType::InputObject(o)) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&Enum> {
        self.types.get(name).and_then(NamedType::as_enum)
    }

    /// Removes a type by name, preserving the order of the remaining types.
    pub fn remove(&mut self, name: &str) -> Option<NamedType> {
        self.types.shift_remove(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn root_object_mut(&mut self, name: Option<&String>) -> Option<&mut Object> {
        let name = name?.clone();
        self.object_mut(&name)
    }

    pub fn query_type_mut(&mut self) -> Option<&mut Object> {
        let name = self.query_type.clone();
        self.root_object_mut(name.as_ref())
    }

    pub fn mutation_type_mut(&mut self) -> Option<&mut Object> {
        let name = self.mutation_type.clone();
        self.root_object_mut(name.as_ref())
    }

    pub fn subscription_type_mut(&mut self) -> Option<&mut Object> {
        let name = self.subscription_type.clone();
        self.root_object_mut(name.as_ref())
    }

    /// Returns true if the innermost named type of the reference is a leaf
    /// (scalar or enum).
    #[must_use]
    pub fn is_leaf(&self, ty: &TypeRef) -> bool {
        self.get(ty.name()).is_some_and(NamedType::is_leaf)
    }

    /// Forces every pending field thunk, in registration order.
    ///
    /// Thunks may register further types while running; those are appended
    /// after the current position and visited by the same pass. Resolving an
    /// already-resolved schema is a no-op.
    pub fn resolve_types(&mut self) -> Result<(), SchemaError> {
        enum Pending {
            Object(super::types::FieldsThunk),
            Input(super::types::InputFieldsThunk),
        }

        let mut index = 0;
        while index < self.types.len() {
            let (name, ty) = self
                .types
                .get_index_mut(index)
                .expect("index bounded by len");
            let name = name.clone();

            let pending = match ty {
                NamedType::Object(o) => o.take_thunk().map(Pending::Object),
                NamedType::InputObject(o) => o.take_thunk().map(Pending::Input),
                _ => None,
            };

            match pending {
                Some(Pending::Object(thunk)) => {
                    let fields = thunk(self)?;
                    if let Some(obj) = self.object_mut(&name) {
                        obj.set_fields(fields);
                    }
                }
                Some(Pending::Input(thunk)) => {
                    let fields = thunk(self)?;
                    if let Some(obj) = self.input_object_mut(&name) {
                        obj.set_fields(fields);
                    }
                }
                None => {}
            }

            index += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gql::types::Field;

    #[test]
    fn test_register_rejects_duplicates() {
        let mut schema = Schema::new();
        schema.register(Object::new("User")).unwrap();
        let err = schema.register(Object::new("User")).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::TypeAlreadyExists { type_name } if type_name == "User"
        ));
    }

    #[test]
    fn test_resolve_forces_thunks_in_order() {
        let mut schema = Schema::new();
        schema
            .register(Object::new("A").fields_thunk(|schema| {
                // Registers a dependency while resolving; the same pass must
                // pick it up.
                schema.register(Enum::new("Lazy").item("x"))?;
                let mut fields = IndexMap::new();
                fields.insert("lazy".to_string(), Field::new("lazy", TypeRef::named("Lazy")));
                Ok(fields)
            }))
            .unwrap();

        schema.resolve_types().unwrap();

        assert!(schema.object("A").unwrap().is_resolved());
        assert!(schema.has_type("Lazy"));
        // A second resolve pass is a no-op.
        schema.resolve_types().unwrap();
    }

    #[test]
    fn test_thunk_error_propagates() {
        let mut schema = Schema::new();
        schema
            .register(InputObject::new("Broken").fields_thunk(|_| {
                Err(SchemaError::TypeNotFound {
                    type_name: "Missing".to_string(),
                })
            }))
            .unwrap();

        let err = schema.resolve_types().unwrap_err();
        assert!(matches!(err, SchemaError::TypeNotFound { .. }));
    }

    #[test]
    fn test_leaf_detection() {
        let mut schema = Schema::new();
        schema.register(crate::gql::Scalar::new("Int")).unwrap();
        schema.register(Object::new("User")).unwrap();

        assert!(schema.is_leaf(&TypeRef::named("Int")));
        assert!(schema.is_leaf(&TypeRef::named_list("Int")));
        assert!(!schema.is_leaf(&TypeRef::named("User")));
        assert!(!schema.is_leaf(&TypeRef::named("Unknown")));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut schema = Schema::new();
        schema.register(Object::new("A")).unwrap();
        schema.register(Object::new("B")).unwrap();
        schema.register(Object::new("C")).unwrap();

        schema.remove("B");

        let names: Vec<_> = schema.type_names().collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
