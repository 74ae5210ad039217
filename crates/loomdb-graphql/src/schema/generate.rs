//! Dynamic type-graph generation.
//!
//! The generator takes built collection descriptors and produces the full
//! queryable type graph: one object per collection plus its filter, order,
//! groupBy, aggregate, and mutation-input types, wired onto the root
//! Query/Mutation/Subscription objects.
//!
//! Generation is a strictly ordered multi-pass pipeline. Object field maps
//! are deferred behind thunks so that mutually referencing collections can
//! be registered in any order; explicit resolve steps between phases force
//! whatever the next phase needs to inspect.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use loomdb_core::{Collection, FieldKind, request};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::gql::{Enum, Field, InputObject, InputValue, Object, Schema, TypeRef};
use crate::schema::descriptions;
use crate::schema::types;

pub(crate) const FILTER_INPUT_NAME_SUFFIX: &str = "FilterArg";
pub(crate) const MUTATION_INPUT_NAME_SUFFIX: &str = "MutationInputArg";
pub(crate) const ORDER_INPUT_NAME_SUFFIX: &str = "OrderArg";
pub(crate) const TYPE_FIELD_ENUM_SUFFIX: &str = "Field";
pub(crate) const TYPE_EXPLICIT_FIELD_ENUM_SUFFIX: &str = "ExplicitField";

fn filter_name(type_name: &str) -> String {
    format!("{type_name}{FILTER_INPUT_NAME_SUFFIX}")
}

fn order_name(type_name: &str) -> String {
    format!("{type_name}{ORDER_INPUT_NAME_SUFFIX}")
}

fn fields_enum_name(type_name: &str) -> String {
    format!("{type_name}{TYPE_FIELD_ENUM_SUFFIX}")
}

fn numeric_selector_name(host_name: &str) -> String {
    format!("{host_name}__NumericSelector")
}

fn inline_numeric_selector_name(host_name: &str, field_name: &str) -> String {
    format!("{host_name}__{field_name}__NumericSelector")
}

fn count_selector_name(host_name: &str) -> String {
    format!("{host_name}__CountSelector")
}

fn inline_count_selector_name(host_name: &str, field_name: &str) -> String {
    format!("{host_name}__{field_name}__CountSelector")
}

fn is_numeric_scalar(name: &str) -> bool {
    matches!(name, TypeRef::INT | TypeRef::FLOAT32 | TypeRef::FLOAT64)
}

/// Returns true if the list holds numeric values, nillable or not.
fn is_numeric_array(ty: &TypeRef) -> bool {
    ty.is_list() && is_numeric_scalar(ty.name())
}

/// Element types that get standalone leaf filter inputs, usable when
/// filtering inside inline arrays.
fn inline_array_element_names() -> Vec<String> {
    let mut names = Vec::new();
    for scalar in ["Boolean", "Int", "Float32", "Float64", "String"] {
        names.push(scalar.to_string());
        names.push(format!("NotNull{scalar}"));
    }
    names
}

/// Builds the queryable and mutable type graph for a set of collections
/// against a shared schema.
pub struct Generator<'a> {
    schema: &'a mut Schema,
    /// Names of the objects built by this run, in build order.
    type_defs: Vec<String>,
    /// Edges already visited by the argument-expansion pass, keyed by
    /// (object name, field name) so the same child type can be expanded
    /// independently under each distinct parent edge.
    expanded_fields: HashSet<(String, String)>,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(schema: &'a mut Schema) -> Self {
        Self {
            schema,
            type_defs: Vec::new(),
            expanded_fields: HashSet::new(),
        }
    }

    /// Runs the full generation pipeline. The caller owns rollback.
    pub(crate) fn generate(&mut self, collections: &[Collection]) -> Result<Vec<String>> {
        debug!(count = collections.len(), "building collection types");
        let defs = self.build_types(collections)?;
        self.build_mutation_input_types(collections)?;
        self.schema.resolve_types()?;

        // For each built type, generate its query surface. Embedded objects
        // still need the generated input types (grouping relies on them) but
        // must not be queryable directly, so they are kept off the roots.
        let mut generated_query_fields = Vec::new();
        for type_name in self.type_defs.clone() {
            let field = self.generate_query_input_for_type(&type_name)?;
            generated_query_fields.push(field.clone());

            let is_embedded = collections
                .iter()
                .any(|c| c.schema.name == type_name && c.is_embedded());
            if is_embedded {
                continue;
            }

            if let Some(query) = self.schema.query_type_mut() {
                query.add_field(field.clone());
            }
            if let Some(subscription) = self.schema.subscription_type_mut() {
                subscription.add_field(field);
            }
        }

        self.schema.resolve_types()?;

        self.gen_aggregate_fields()?;
        self.schema.resolve_types()?;

        for element in inline_array_element_names() {
            let leaf_filter = gen_leaf_filter_arg_input(&element);
            self.append_if_not_exists(leaf_filter)?;
        }
        self.schema.resolve_types()?;

        // Secondary pass expanding the arguments of nested object fields,
        // applied only to the objects behind the generated query fields.
        for field in &generated_query_fields {
            if field.ty.is_list() {
                self.expand_input_argument(field.ty.name().to_string())?;
            }
        }

        self.append_commit_child_group_field();
        self.schema.resolve_types()?;

        debug!("generating mutation fields");
        for type_name in self.type_defs.clone() {
            if is_read_only(&type_name, collections) {
                continue;
            }
            let fields = self.generate_mutation_input_for_type(&type_name)?;
            if let Some(mutation) = self.schema.mutation_type_mut() {
                for field in fields {
                    mutation.add_field(field);
                }
            }
        }

        self.schema.resolve_types()?;

        Ok(defs)
    }

    /// Registers one object per collection, with its field map deferred so
    /// relation targets defined later in the document resolve correctly.
    fn build_types(&mut self, collections: &[Collection]) -> Result<Vec<String>> {
        let object_name_by_schema_name: HashMap<String, String> = collections
            .iter()
            .map(|c| (c.schema.name.clone(), c.name().to_string()))
            .collect();

        let mut defs = Vec::new();

        for collection in collections {
            let object_name = collection.name().to_string();
            let is_view_object = collection.is_embedded() || collection.version.is_view();

            if self.schema.has_type(&object_name) {
                return Err(SchemaError::TypeAlreadyExists {
                    type_name: object_name,
                });
            }

            let thunk_name = object_name.clone();
            let field_descriptions = collection.fields();
            let targets = object_name_by_schema_name.clone();

            let object = Object::new(&object_name).fields_thunk(move |schema| {
                let mut fields = IndexMap::new();

                if !is_view_object {
                    fields.insert(
                        request::DOC_ID_FIELD_NAME.to_string(),
                        Field::new(request::DOC_ID_FIELD_NAME, TypeRef::named(TypeRef::ID))
                            .description(descriptions::DOC_ID_FIELD_DESCRIPTION),
                    );
                }

                for field in &field_descriptions {
                    if field.name == request::DOC_ID_FIELD_NAME {
                        // Already defined above; the descriptor entry must
                        // not override the standard definition.
                        continue;
                    }

                    let ty = match &field.kind {
                        FieldKind::Object { name, is_array } => {
                            let target = targets.get(name).filter(|t| schema.has_type(t)).ok_or(
                                SchemaError::TypeNotFound {
                                    type_name: field.kind.to_string(),
                                },
                            )?;
                            if *is_array {
                                TypeRef::named_list(target.clone())
                            } else {
                                TypeRef::named(target.clone())
                            }
                        }
                        kind => descriptions::field_kind_type_ref(kind).ok_or(
                            SchemaError::TypeNotFound {
                                type_name: kind.to_string(),
                            },
                        )?,
                    };

                    fields.insert(field.name.clone(), Field::new(&field.name, ty));
                }

                if !schema.has_type(&thunk_name) {
                    return Err(SchemaError::ObjectNotFoundDuringThunk {
                        type_name: thunk_name,
                    });
                }

                fields.insert(
                    request::GROUP_FIELD_NAME.to_string(),
                    Field::new(request::GROUP_FIELD_NAME, TypeRef::named_list(&thunk_name))
                        .description(descriptions::GROUP_FIELD_DESCRIPTION),
                );

                if !is_view_object {
                    fields.insert(
                        request::VERSION_FIELD_NAME.to_string(),
                        Field::new(
                            request::VERSION_FIELD_NAME,
                            TypeRef::named_list(request::COMMIT_TYPE_NAME),
                        )
                        .description(descriptions::VERSION_FIELD_DESCRIPTION),
                    );
                    fields.insert(
                        request::DELETED_FIELD_NAME.to_string(),
                        Field::new(request::DELETED_FIELD_NAME, TypeRef::named(TypeRef::BOOLEAN))
                            .description(descriptions::DELETED_FIELD_DESCRIPTION),
                    );
                }

                Ok(fields)
            });

            self.schema.register(object)?;
            self.type_defs.push(object_name.clone());
            defs.push(object_name);
        }

        Ok(defs)
    }

    /// Registers the flat create/update input object for every collection
    /// users can mutate documents through.
    fn build_mutation_input_types(&mut self, collections: &[Collection]) -> Result<()> {
        for collection in collections {
            let Some(collection_name) = collection.version.name.clone() else {
                // Collectionless schemas cannot be mutated through, so they
                // need no input type.
                continue;
            };

            let input_name = format!("{collection_name}{MUTATION_INPUT_NAME_SUFFIX}");
            if self.schema.has_type(&input_name) {
                return Err(SchemaError::MutationInputTypeAlreadyExist {
                    type_name: input_name,
                });
            }

            let field_descriptions = collection.fields();
            let input = InputObject::new(&input_name).fields_thunk(move |_schema| {
                let mut fields = IndexMap::new();

                for field in &field_descriptions {
                    // System fields cannot be written by the user.
                    if field.name.starts_with('_') {
                        continue;
                    }

                    let ty = match &field.kind {
                        FieldKind::Object { is_array, .. } => {
                            if *is_array {
                                TypeRef::named_list(TypeRef::ID)
                            } else {
                                TypeRef::named(TypeRef::ID)
                            }
                        }
                        kind => descriptions::field_kind_type_ref(kind).ok_or(
                            SchemaError::TypeNotFound {
                                type_name: kind.to_string(),
                            },
                        )?,
                    };

                    fields.insert(field.name.clone(), InputValue::new(&field.name, ty));
                }

                Ok(fields)
            });

            self.schema.register(input)?;
        }

        Ok(())
    }

    /// Generates the filter, groupBy, and order inputs for one object and
    /// returns its root query field.
    fn generate_query_input_for_type(&mut self, type_name: &str) -> Result<Field> {
        let filter = gen_type_filter_arg_input(type_name);
        let group_by = self.gen_type_fields_enum(type_name)?;
        let order = gen_type_order_arg_input(type_name);

        let description = self
            .schema
            .object(type_name)
            .and_then(|o| o.description.clone());

        self.schema.replace(filter);
        self.schema.replace(group_by);
        self.schema.replace(order);

        let mut field = Field::new(type_name, TypeRef::named_list(type_name))
            .arg(
                InputValue::new(request::DOC_ID_ARG_NAME, TypeRef::named(TypeRef::STRING))
                    .description(descriptions::DOC_ID_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::DOC_IDS_ARG_NAME, TypeRef::named_nn_list(TypeRef::STRING))
                    .description(descriptions::DOC_IDS_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::CID_ARG_NAME, TypeRef::named(TypeRef::STRING))
                    .description(descriptions::CID_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::FILTER_CLAUSE, TypeRef::named(filter_name(type_name)))
                    .description(descriptions::SELECT_FILTER_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(
                    request::GROUP_BY_CLAUSE,
                    TypeRef::named_nn_list(fields_enum_name(type_name)),
                )
                .description(types::GROUP_BY_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::ORDER_CLAUSE, TypeRef::named(order_name(type_name)))
                    .description(types::ORDER_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::SHOW_DELETED_ARG_NAME, TypeRef::named(TypeRef::BOOLEAN))
                    .description(descriptions::SHOW_DELETED_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                    .description(types::LIMIT_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                    .description(types::OFFSET_ARG_DESCRIPTION),
            );
        if let Some(description) = description {
            field = field.description(description);
        }

        Ok(field)
    }

    /// The enum of every field on the object, used as the groupBy target.
    fn gen_type_fields_enum(&self, type_name: &str) -> Result<Enum> {
        let object = self
            .schema
            .object(type_name)
            .ok_or(SchemaError::ObjectNotFoundDuringThunk {
                type_name: type_name.to_string(),
            })?;

        let mut fields_enum = Enum::new(fields_enum_name(type_name));
        for name in object.fields().keys() {
            fields_enum = fields_enum.item(name.clone());
        }
        Ok(fields_enum)
    }

    /// The enum of user-declared fields, used to pick encryption targets.
    fn gen_user_explicit_type_fields_enum(&self, type_name: &str) -> Result<Enum> {
        let object = self
            .schema
            .object(type_name)
            .ok_or(SchemaError::ObjectNotFoundDuringThunk {
                type_name: type_name.to_string(),
            })?;

        let mut fields_enum = Enum::new(format!("{type_name}{TYPE_EXPLICIT_FIELD_ENUM_SUFFIX}"));
        for name in object.fields().keys() {
            if name.starts_with('_') {
                continue;
            }
            fields_enum = fields_enum.item(name.clone());
        }
        Ok(fields_enum)
    }

    fn gen_aggregate_fields(&mut self) -> Result<()> {
        let mut top_level_count_args = Vec::new();
        let mut top_level_numeric_args = Vec::new();

        for type_name in self.type_defs.clone() {
            let numeric_arg = gen_numeric_aggregate_base_arg_input(&type_name);
            top_level_numeric_args.push((type_name.clone(), numeric_arg.name.clone()));
            self.append_if_not_exists(numeric_arg)?;

            for input in self.gen_numeric_inline_array_selectors(&type_name) {
                self.append_if_not_exists(input)?;
            }

            let count_arg = gen_count_base_arg_input(&type_name);
            top_level_count_args.push((type_name.clone(), count_arg.name.clone()));
            self.append_if_not_exists(count_arg)?;

            for input in self.gen_count_inline_array_selectors(&type_name) {
                self.append_if_not_exists(input)?;
            }
        }

        for type_name in self.type_defs.clone() {
            let count_field = self.gen_count_field_config(&type_name);
            let sum_field = self.gen_numeric_field_config(
                &type_name,
                request::SUM_FIELD_NAME,
                types::SUM_FIELD_DESCRIPTION,
            );
            let average_field = self.gen_numeric_field_config(
                &type_name,
                request::AVERAGE_FIELD_NAME,
                types::AVERAGE_FIELD_DESCRIPTION,
            );

            if let Some(object) = self.schema.object_mut(&type_name) {
                object.add_field(count_field);
                object.add_field(sum_field);
                object.add_field(average_field);
            }
        }

        // Top-level aggregates span all collections, one argument per
        // collection object.
        let mut count_field = Field::new(request::COUNT_FIELD_NAME, TypeRef::named(TypeRef::INT))
            .description(types::COUNT_FIELD_DESCRIPTION);
        for (object_name, input_name) in &top_level_count_args {
            count_field = count_field.arg(InputValue::new(object_name, TypeRef::named(input_name)));
        }

        let mut sum_field = Field::new(request::SUM_FIELD_NAME, TypeRef::named(TypeRef::FLOAT64))
            .description(types::SUM_FIELD_DESCRIPTION);
        let mut average_field =
            Field::new(request::AVERAGE_FIELD_NAME, TypeRef::named(TypeRef::FLOAT64))
                .description(types::AVERAGE_FIELD_DESCRIPTION);
        for (object_name, input_name) in &top_level_numeric_args {
            sum_field = sum_field.arg(InputValue::new(object_name, TypeRef::named(input_name)));
            average_field =
                average_field.arg(InputValue::new(object_name, TypeRef::named(input_name)));
        }

        if let Some(query) = self.schema.query_type_mut() {
            query.add_field(count_field);
            query.add_field(sum_field);
            query.add_field(average_field);
        }

        Ok(())
    }

    /// The `_count` field for one object: one argument per countable list
    /// field.
    fn gen_count_field_config(&self, type_name: &str) -> Field {
        let mut args = Vec::new();
        for (field_name, field) in self.object_field_types(type_name) {
            if !field.is_list() {
                continue;
            }

            // Prefer the per-collection selector for relations, falling
            // back to the per-field selector created for inline arrays.
            let object_selector = count_selector_name(field.name());
            let selector = if self.schema.has_type(&object_selector) {
                object_selector
            } else {
                let inline_selector = inline_count_selector_name(type_name, &field_name);
                if !self.schema.has_type(&inline_selector) {
                    continue;
                }
                inline_selector
            };

            args.push(InputValue::new(field_name, TypeRef::named(selector)));
        }

        let mut field = Field::new(request::COUNT_FIELD_NAME, TypeRef::named(TypeRef::INT))
            .description(types::COUNT_FIELD_DESCRIPTION);
        for arg in args {
            field = field.arg(arg);
        }
        field
    }

    /// The `_sum`/`_avg` field for one object: one argument per summable
    /// list field. Fields whose selector was never registered hold nothing
    /// numeric and are skipped.
    fn gen_numeric_field_config(&self, type_name: &str, name: &str, description: &str) -> Field {
        let mut args = Vec::new();
        for (field_name, field) in self.object_field_types(type_name) {
            if !field.is_list() {
                continue;
            }

            let selector = if is_numeric_array(&field) {
                inline_numeric_selector_name(type_name, &field_name)
            } else {
                numeric_selector_name(field.name())
            };
            if !self.schema.has_type(&selector) {
                continue;
            }

            args.push(InputValue::new(field_name, TypeRef::named(selector)));
        }

        let mut field =
            Field::new(name, TypeRef::named(TypeRef::FLOAT64)).description(description);
        for arg in args {
            field = field.arg(arg);
        }
        field
    }

    /// Per-field selector inputs for numeric inline arrays. An empty-ish
    /// object is required as the argument type because input unions are not
    /// available.
    fn gen_numeric_inline_array_selectors(&self, type_name: &str) -> Vec<InputObject> {
        let mut inputs = Vec::new();
        for (field_name, field) in self.object_field_types(type_name) {
            if !is_numeric_array(&field) {
                continue;
            }
            inputs.push(
                InputObject::new(inline_numeric_selector_name(type_name, &field_name))
                    .field(
                        InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                            .description(types::LIMIT_ARG_DESCRIPTION),
                    )
                    .field(
                        InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                            .description(types::OFFSET_ARG_DESCRIPTION),
                    )
                    .field(
                        InputValue::new(request::ORDER_CLAUSE, TypeRef::named("Ordering"))
                            .description(types::ORDER_ARG_DESCRIPTION),
                    ),
            );
        }
        inputs
    }

    /// Per-field count selector inputs, one for every list field.
    fn gen_count_inline_array_selectors(&self, type_name: &str) -> Vec<InputObject> {
        let mut inputs = Vec::new();
        for (field_name, field) in self.object_field_types(type_name) {
            if !field.is_list() {
                continue;
            }
            inputs.push(
                InputObject::new(inline_count_selector_name(type_name, &field_name))
                    .field(
                        InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                            .description(types::LIMIT_ARG_DESCRIPTION),
                    )
                    .field(
                        InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                            .description(types::OFFSET_ARG_DESCRIPTION),
                    ),
            );
        }
        inputs
    }

    /// Snapshot of an object's (field name, type) pairs.
    fn object_field_types(&self, type_name: &str) -> Vec<(String, TypeRef)> {
        self.schema.object(type_name).map_or_else(Vec::new, |o| {
            o.fields()
                .iter()
                .map(|(name, field)| (name.clone(), field.ty.clone()))
                .collect()
        })
    }

    /// Attaches `_group` to the commit object. Commits are grouped like any
    /// other query but are not part of the generic per-collection loop.
    fn append_commit_child_group_field(&mut self) {
        if let Some(commit) = self.schema.object_mut(request::COMMIT_TYPE_NAME) {
            commit.add_field(
                Field::new(
                    request::GROUP_FIELD_NAME,
                    TypeRef::named_list(request::COMMIT_TYPE_NAME),
                )
                .description(descriptions::GROUP_FIELD_DESCRIPTION),
            );
        }
    }

    /// Recursively replaces object-typed fields with versions exposing
    /// query arguments, and wires filters into aggregate arguments.
    ///
    /// The visited-edge set is the only cycle defence: the same child type
    /// may legitimately be expanded once under every distinct parent edge.
    fn expand_input_argument(&mut self, type_name: String) -> Result<()> {
        for (field_name, field_ty) in self.object_field_types(&type_name) {
            let is_aggregate = request::is_aggregate_field(&field_name);
            if request::is_reserved_field(&field_name)
                && field_name != request::GROUP_FIELD_NAME
                && !is_aggregate
            {
                continue;
            }

            let edge = (type_name.clone(), field_name.clone());

            if field_ty.is_list() {
                let target_name = field_ty.name().to_string();
                if self.schema.object(&target_name).is_none() {
                    continue;
                }
                if !self.expanded_fields.insert(edge) {
                    continue;
                }

                // Children first, so nested arguments exist before the
                // parent field is replaced.
                self.expand_input_argument(target_name.clone())?;

                let expanded = expanded_field_list(&field_name, &target_name, &field_ty);
                if let Some(object) = self.schema.object_mut(&type_name) {
                    let description = object.fields().get(&field_name).and_then(|f| f.description.clone());
                    let mut expanded = expanded;
                    if let Some(description) = description {
                        expanded = expanded.description(description);
                    }
                    object.add_field(expanded);
                }
            } else if self.schema.object(field_ty.name()).is_some() {
                let target_name = field_ty.name().to_string();
                if !self.expanded_fields.insert(edge) {
                    continue;
                }

                self.expand_input_argument(target_name.clone())?;

                if let Some(object) = self.schema.object_mut(&type_name) {
                    let description = object.fields().get(&field_name).and_then(|f| f.description.clone());
                    let mut expanded = Field::new(&field_name, field_ty.clone()).arg(
                        InputValue::new(request::FILTER_CLAUSE, TypeRef::named(filter_name(&target_name)))
                            .description(descriptions::SINGLE_FIELD_FILTER_ARG_DESCRIPTION),
                    );
                    if let Some(description) = description {
                        expanded = expanded.description(description);
                    }
                    object.add_field(expanded);
                }
            } else if is_aggregate {
                self.create_expanded_field_aggregate(&type_name, &field_name)?;
            }
        }

        Ok(())
    }

    /// Adds a `filter` input to every target selector of an aggregate
    /// field, matched to the filter type of the aggregated values.
    fn create_expanded_field_aggregate(
        &mut self,
        type_name: &str,
        aggregate_name: &str,
    ) -> Result<()> {
        let targets: Vec<(String, TypeRef)> = self
            .schema
            .object(type_name)
            .and_then(|o| o.fields().get(aggregate_name))
            .map_or_else(Vec::new, |f| {
                f.args
                    .iter()
                    .map(|(name, arg)| (name.clone(), arg.ty.clone()))
                    .collect()
            });

        for (target, selector_ty) in targets {
            let filter_type_name = if target == request::GROUP_FIELD_NAME {
                filter_name(type_name)
            } else {
                let Some(targeted) = self
                    .schema
                    .object(type_name)
                    .and_then(|o| o.fields().get(&target))
                    .map(|f| f.ty.clone())
                else {
                    return Err(SchemaError::AggregateTargetNotFound {
                        host_name: type_name.to_string(),
                        target_name: target,
                    });
                };

                if targeted.is_list() && self.schema.is_leaf(&targeted) {
                    // Lists of leaves filter directly on the operator
                    // blocks; non-null element names need the NotNull
                    // prefix as '!' cannot appear in a type name.
                    let non_null_element = targeted
                        .list_item()
                        .is_some_and(TypeRef::is_non_null);
                    if non_null_element {
                        format!("NotNull{}{FILTER_INPUT_NAME_SUFFIX}", targeted.name())
                    } else {
                        filter_name(targeted.name())
                    }
                } else {
                    filter_name(targeted.name())
                }
            };

            // Some targets cannot be filtered, e.g. when aggregating
            // `_version`; those simply get no filter argument.
            if !self.schema.has_type(&filter_type_name) {
                continue;
            }

            if let Some(selector) = self.schema.input_object_mut(selector_ty.name()) {
                selector.add_field(
                    InputValue::new(request::FILTER_CLAUSE, TypeRef::named(filter_type_name))
                        .description(descriptions::AGGREGATE_FILTER_ARG_DESCRIPTION),
                );
            }
        }

        Ok(())
    }

    /// Builds the create/update/delete mutation fields for one object.
    fn generate_mutation_input_for_type(&mut self, type_name: &str) -> Result<Vec<Field>> {
        let filter_input_name = filter_name(type_name);
        if self.schema.input_object(&filter_input_name).is_none() {
            return Err(SchemaError::TypeNotFound {
                type_name: filter_input_name,
            });
        }

        let mutation_input_name = format!("{type_name}{MUTATION_INPUT_NAME_SUFFIX}");
        if !self.schema.has_type(&mutation_input_name) {
            return Err(SchemaError::TypeNotFound {
                type_name: mutation_input_name,
            });
        }

        let explicit_fields_enum = self.gen_user_explicit_type_fields_enum(type_name)?;
        let explicit_fields_enum_name = explicit_fields_enum.name.clone();
        self.schema.replace(explicit_fields_enum);

        let create = Field::new(format!("create_{type_name}"), TypeRef::named_list(type_name))
            .description(descriptions::CREATE_DOCUMENT_DESCRIPTION)
            .arg(
                InputValue::new(request::INPUT_ARG_NAME, TypeRef::named(&mutation_input_name))
                    .description(format!("Create a {type_name} document")),
            )
            .arg(
                InputValue::new(
                    request::INPUTS_ARG_NAME,
                    TypeRef::named_nn_list(&mutation_input_name),
                )
                .description(format!("Create {type_name} documents")),
            )
            .arg(
                InputValue::new(request::ENCRYPT_DOC_ARG_NAME, TypeRef::named(TypeRef::BOOLEAN))
                    .description(descriptions::ENCRYPT_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(
                    request::ENCRYPT_FIELDS_ARG_NAME,
                    TypeRef::named_nn_list(explicit_fields_enum_name),
                )
                .description(descriptions::ENCRYPT_FIELDS_ARG_DESCRIPTION),
            );

        let update = Field::new(format!("update_{type_name}"), TypeRef::named_list(type_name))
            .description(descriptions::UPDATE_DOCUMENTS_DESCRIPTION)
            .arg(
                InputValue::new(request::DOC_ID_ARG_NAME, TypeRef::named(TypeRef::ID))
                    .description(descriptions::UPDATE_ID_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::DOC_IDS_ARG_NAME, TypeRef::named_list(TypeRef::ID))
                    .description(descriptions::UPDATE_IDS_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::FILTER_CLAUSE, TypeRef::named(&filter_input_name))
                    .description(descriptions::UPDATE_FILTER_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::INPUT_ARG_NAME, TypeRef::named(&mutation_input_name))
                    .description("Update field values"),
            );

        let delete = Field::new(format!("delete_{type_name}"), TypeRef::named_list(type_name))
            .description(descriptions::DELETE_DOCUMENTS_DESCRIPTION)
            .arg(
                InputValue::new(request::DOC_ID_ARG_NAME, TypeRef::named(TypeRef::ID))
                    .description(descriptions::DELETE_ID_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::DOC_IDS_ARG_NAME, TypeRef::named_list(TypeRef::ID))
                    .description(descriptions::DELETE_IDS_ARG_DESCRIPTION),
            )
            .arg(
                InputValue::new(request::FILTER_CLAUSE, TypeRef::named(&filter_input_name))
                    .description(descriptions::DELETE_FILTER_ARG_DESCRIPTION),
            );

        Ok(vec![create, update, delete])
    }

    fn append_if_not_exists(&mut self, input: InputObject) -> Result<()> {
        if !self.schema.has_type(&input.name) {
            self.schema.register(input)?;
        }
        Ok(())
    }
}

/// Expanded list-of-object field carrying the full set of child query
/// arguments.
fn expanded_field_list(field_name: &str, target_name: &str, ty: &TypeRef) -> Field {
    Field::new(field_name, ty.clone())
        .arg(
            InputValue::new(request::DOC_ID_ARG_NAME, TypeRef::named(TypeRef::STRING))
                .description(descriptions::DOC_ID_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::DOC_IDS_ARG_NAME, TypeRef::named_nn_list(TypeRef::STRING))
                .description(descriptions::DOC_IDS_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::FILTER_CLAUSE, TypeRef::named(filter_name(target_name)))
                .description(descriptions::LIST_FIELD_FILTER_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(
                request::GROUP_BY_CLAUSE,
                TypeRef::named_nn_list(fields_enum_name(target_name)),
            )
            .description(types::GROUP_BY_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::ORDER_CLAUSE, TypeRef::named(order_name(target_name)))
                .description(types::ORDER_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::LIMIT_ARG_DESCRIPTION),
        )
        .arg(
            InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::OFFSET_ARG_DESCRIPTION),
        )
}

/// The self-referential filter input for one object. The body is deferred
/// so that the nested filter types of relation targets can be referenced
/// before they exist.
fn gen_type_filter_arg_input(type_name: &str) -> InputObject {
    let name = filter_name(type_name);
    let self_name = name.clone();
    let object_name = type_name.to_string();

    InputObject::new(name).fields_thunk(move |schema| {
        let mut fields = IndexMap::new();

        fields.insert(
            "_and".to_string(),
            InputValue::new("_and", TypeRef::named_list(&self_name))
                .description(descriptions::AND_OPERATOR_DESCRIPTION),
        );
        fields.insert(
            "_or".to_string(),
            InputValue::new("_or", TypeRef::named_list(&self_name))
                .description(descriptions::OR_OPERATOR_DESCRIPTION),
        );
        fields.insert(
            "_not".to_string(),
            InputValue::new("_not", TypeRef::named(&self_name))
                .description(descriptions::NOT_OPERATOR_DESCRIPTION),
        );

        let object = schema
            .object(&object_name)
            .ok_or(SchemaError::ObjectNotFoundDuringThunk {
                type_name: object_name.clone(),
            })?;
        let field_types: Vec<(String, TypeRef)> = object
            .fields()
            .iter()
            .map(|(name, field)| (name.clone(), field.ty.clone()))
            .collect();

        for (field_name, field_ty) in field_types {
            if request::is_reserved_field(&field_name) && field_name != request::DOC_ID_FIELD_NAME {
                continue;
            }

            if schema.is_leaf(&field_ty) {
                if field_ty.is_list() {
                    // Filtering by inline array values is not supported.
                    continue;
                }
                let operator_block = format!("{}OperatorBlock", field_ty.name());
                if !schema.has_type(&operator_block) {
                    continue;
                }
                fields.insert(
                    field_name.clone(),
                    InputValue::new(field_name, TypeRef::named(operator_block)),
                );
            } else {
                // Relations filter through the target's own filter input;
                // lists filter by element.
                fields.insert(
                    field_name.clone(),
                    InputValue::new(field_name, TypeRef::named(filter_name(field_ty.name()))),
                );
            }
        }

        Ok(fields)
    })
}

/// Standalone filter input for an inline-array element type: the compound
/// `_and`/`_or` operators plus a copy of the element's operator block.
fn gen_leaf_filter_arg_input(element_name: &str) -> InputObject {
    let name = format!("{element_name}{FILTER_INPUT_NAME_SUFFIX}");
    let self_name = name.clone();
    let operator_block = format!("{element_name}OperatorBlock");

    InputObject::new(name).fields_thunk(move |schema| {
        let mut fields = IndexMap::new();

        fields.insert(
            "_and".to_string(),
            InputValue::new("_and", TypeRef::named_list(&self_name)),
        );
        fields.insert(
            "_or".to_string(),
            InputValue::new("_or", TypeRef::named_list(&self_name)),
        );

        let block = schema
            .input_object(&operator_block)
            .ok_or(SchemaError::TypeNotFound {
                type_name: operator_block.clone(),
            })?;
        for (op_name, op) in block.fields() {
            fields.insert(op_name.clone(), InputValue::new(op_name.clone(), op.ty.clone()));
        }

        Ok(fields)
    })
}

/// The order input for one object: leaf fields order by `Ordering`, and
/// singular relations through the target's own order input.
fn gen_type_order_arg_input(type_name: &str) -> InputObject {
    let name = order_name(type_name);
    let object_name = type_name.to_string();

    InputObject::new(name).fields_thunk(move |schema| {
        let mut fields = IndexMap::new();

        let object = schema
            .object(&object_name)
            .ok_or(SchemaError::ObjectNotFoundDuringThunk {
                type_name: object_name.clone(),
            })?;
        let field_types: Vec<(String, TypeRef)> = object
            .fields()
            .iter()
            .map(|(name, field)| (name.clone(), field.ty.clone()))
            .collect();

        for (field_name, field_ty) in field_types {
            if request::is_reserved_field(&field_name) && field_name != request::DOC_ID_FIELD_NAME {
                continue;
            }

            if schema.is_leaf(&field_ty) {
                fields.insert(
                    field_name.clone(),
                    InputValue::new(field_name, TypeRef::named("Ordering")),
                );
            } else if !field_ty.is_list() {
                let nested = order_name(field_ty.name());
                if schema.has_type(&nested) {
                    fields.insert(
                        field_name.clone(),
                        InputValue::new(field_name, TypeRef::named(nested)),
                    );
                }
            }
        }

        Ok(fields)
    })
}

/// The numeric-aggregate selector for one object. The companion fields
/// enum is created lazily inside the thunk because the summable field set
/// is only known once the object is resolved; objects with nothing to sum
/// keep an empty selector and never register the enum.
fn gen_numeric_aggregate_base_arg_input(type_name: &str) -> InputObject {
    let name = numeric_selector_name(type_name);
    let object_name = type_name.to_string();

    InputObject::new(name).fields_thunk(move |schema| {
        let fields_enum_name = format!("{object_name}NumericFieldsArg");

        if !schema.has_type(&fields_enum_name) {
            let object = schema
                .object(&object_name)
                .ok_or(SchemaError::ObjectNotFoundDuringThunk {
                    type_name: object_name.clone(),
                })?;

            let mut fields_enum = Enum::new(&fields_enum_name);
            let mut has_summable_fields = false;
            for (field_name, field) in object.fields() {
                if !field.ty.is_list() {
                    if is_numeric_scalar(field.ty.name()) && matches!(field.ty, TypeRef::Named(_)) {
                        has_summable_fields = true;
                        fields_enum = fields_enum.item(field_name.clone());
                    }
                    continue;
                }

                has_summable_fields = true;
                if is_numeric_array(&field.ty) {
                    fields_enum = fields_enum.item(field_name.clone());
                } else {
                    // Related lists sum through their own _count.
                    fields_enum = fields_enum.item(request::COUNT_FIELD_NAME);
                }
            }
            // Child aggregates are always aggregatable, as they can be
            // present via an inner grouping.
            fields_enum = fields_enum.item(request::SUM_FIELD_NAME);
            fields_enum = fields_enum.item(request::AVERAGE_FIELD_NAME);

            if !has_summable_fields {
                return Ok(IndexMap::new());
            }

            schema.register(fields_enum)?;
        }

        let mut fields = IndexMap::new();
        fields.insert(
            request::FIELD_ARG_NAME.to_string(),
            InputValue::new(
                request::FIELD_ARG_NAME,
                TypeRef::non_null(TypeRef::named(&fields_enum_name)),
            ),
        );
        fields.insert(
            request::LIMIT_CLAUSE.to_string(),
            InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::LIMIT_ARG_DESCRIPTION),
        );
        fields.insert(
            request::OFFSET_CLAUSE.to_string(),
            InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::OFFSET_ARG_DESCRIPTION),
        );
        fields.insert(
            request::ORDER_CLAUSE.to_string(),
            InputValue::new(request::ORDER_CLAUSE, TypeRef::named(order_name(&object_name)))
                .description(types::ORDER_ARG_DESCRIPTION),
        );
        Ok(fields)
    })
}

/// The count selector for one object: plain limit/offset.
fn gen_count_base_arg_input(type_name: &str) -> InputObject {
    InputObject::new(count_selector_name(type_name))
        .field(
            InputValue::new(request::LIMIT_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::LIMIT_ARG_DESCRIPTION),
        )
        .field(
            InputValue::new(request::OFFSET_CLAUSE, TypeRef::named(TypeRef::INT))
                .description(types::OFFSET_ARG_DESCRIPTION),
        )
}

/// Views and embedded objects are read-only; no mutation fields exist for
/// them.
fn is_read_only(type_name: &str, collections: &[Collection]) -> bool {
    for collection in collections {
        if collection.version.name.as_deref() == Some(type_name) {
            return collection.version.is_view();
        }
    }
    // No collection with this name; a matching schema name means an
    // embedded object, which is always read-only.
    collections.iter().any(|c| c.schema.name == type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_type_names() {
        assert_eq!(filter_name("User"), "UserFilterArg");
        assert_eq!(order_name("User"), "UserOrderArg");
        assert_eq!(fields_enum_name("User"), "UserField");
        assert_eq!(numeric_selector_name("User"), "User__NumericSelector");
        assert_eq!(
            inline_numeric_selector_name("User", "scores"),
            "User__scores__NumericSelector"
        );
        assert_eq!(
            inline_count_selector_name("User", "scores"),
            "User__scores__CountSelector"
        );
    }

    #[test]
    fn test_numeric_array_detection() {
        assert!(is_numeric_array(&TypeRef::named_list("Int")));
        assert!(is_numeric_array(&TypeRef::named_nn_list("Float64")));
        assert!(is_numeric_array(&TypeRef::named_list("Float32")));
        assert!(!is_numeric_array(&TypeRef::named_list("String")));
        assert!(!is_numeric_array(&TypeRef::named("Int")));
        assert!(!is_numeric_array(&TypeRef::named_list("User")));
    }

    #[test]
    fn test_inline_array_elements_cover_not_null_variants() {
        let names = inline_array_element_names();
        assert!(names.contains(&"Int".to_string()));
        assert!(names.contains(&"NotNullInt".to_string()));
        assert!(names.contains(&"NotNullString".to_string()));
        assert_eq!(names.len(), 10);
    }
}
