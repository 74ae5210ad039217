//! Type-system lifecycle.

use loomdb_core::Collection;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::gql::{Object, Schema};
use crate::schema::generate::Generator;
use crate::schema::types;

/// Owns the type registry for one store and grows it as collections are
/// added.
///
/// A fresh manager holds only the static type set: scalars, operator
/// blocks, the commit types, and empty root objects. Each [`generate`]
/// call layers the types for a batch of collections on top.
///
/// [`generate`]: SchemaManager::generate
pub struct SchemaManager {
    schema: Schema,
}

impl SchemaManager {
    /// Creates a manager holding the static default types, fully resolved.
    pub fn new() -> Result<Self> {
        let mut schema = Schema::new();

        for scalar in types::default_scalars() {
            schema.register(scalar)?;
        }
        schema.register(types::ordering_enum())?;
        schema.register(types::crdt_enum())?;
        schema.register(types::explain_enum())?;
        for block in types::operator_blocks() {
            schema.register(block)?;
        }

        schema.register(types::commit_object())?;
        schema.register(types::commit_link_object())?;
        schema.register(types::signature_object())?;
        schema.register(types::commits_order_arg())?;
        schema.register(types::commit_fields_enum())?;
        schema.register(types::commit_count_field_arg())?;

        let query = Object::new("Query")
            .field(types::commits_query_field())
            .field(types::latest_commits_query_field());
        schema.register(query)?;
        schema.register(Object::new("Mutation"))?;
        schema.register(Object::new("Subscription"))?;
        schema.set_query_type("Query");
        schema.set_mutation_type("Mutation");
        schema.set_subscription_type("Subscription");

        schema.resolve_types()?;

        Ok(Self { schema })
    }

    /// Extends the type graph with the given collections, returning the
    /// names of the objects added.
    ///
    /// On error the registry is restored to its previous type set, so a
    /// rejected batch leaves the manager usable.
    #[instrument(skip_all, fields(collections = collections.len()))]
    pub fn generate(&mut self, collections: &[Collection]) -> Result<Vec<String>> {
        let previous: Vec<String> = self.schema.type_names().map(String::from).collect();

        match Generator::new(&mut self.schema).generate(collections) {
            Ok(defs) => {
                debug!(added = defs.len(), "type generation complete");
                Ok(defs)
            }
            Err(err) => {
                let added: Vec<String> = self
                    .schema
                    .type_names()
                    .filter(|name| !previous.iter().any(|p| p == name))
                    .map(String::from)
                    .collect();
                for name in added {
                    self.schema.remove(&name);
                }
                Err(err)
            }
        }
    }

    /// Read access to the current type registry.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager_holds_static_types() {
        let manager = SchemaManager::new().unwrap();
        let schema = manager.schema();

        for name in [
            "String",
            "Int",
            "Boolean",
            "ID",
            "Float32",
            "Float64",
            "DateTime",
            "Blob",
            "JSON",
            "Ordering",
            "CRDTType",
            "ExplainType",
            "Commit",
            "CommitLink",
            "Signature",
            "IntOperatorBlock",
            "NotNullIntOperatorBlock",
            "StringListOperatorBlock",
        ] {
            assert!(schema.has_type(name), "missing {name}");
        }

        // JSON values have no comparable operator set.
        assert!(!schema.has_type("JSONOperatorBlock"));

        let query = schema.object("Query").unwrap();
        assert!(query.fields().contains_key("commits"));
        assert!(query.fields().contains_key("latestCommits"));
        assert!(schema.object("Mutation").unwrap().fields().is_empty());
        assert!(schema.object("Subscription").unwrap().fields().is_empty());
    }

    #[test]
    fn test_new_manager_is_deterministic() {
        let first = SchemaManager::new().unwrap();
        let second = SchemaManager::new().unwrap();

        let first_names: Vec<&str> = first.schema().type_names().collect();
        let second_names: Vec<&str> = second.schema().type_names().collect();
        assert_eq!(first_names, second_names);
    }
}
