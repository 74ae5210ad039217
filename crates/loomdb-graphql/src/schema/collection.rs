//! Collection builder.
//!
//! Turns a parsed definition document into collection descriptors. Object
//! definitions become full collections, interface definitions become
//! schema-only (embedded) collections, and anything else is skipped.
//! Relation reconciliation happens afterwards in a whole-schema pass, see
//! [`super::relations`].

use std::collections::{HashMap, HashSet};

use loomdb_core::{
    CType, Collection, CollectionFieldDescription, CollectionVersion, CoreError,
    EncryptedIndexCreateRequest, EncryptedIndexType, FieldKind, IndexDescription,
    IndexedFieldDescription, PolicyDescription, Schema, SchemaFieldDescription,
    VectorEmbeddingDescription, request,
};

use crate::ast::{
    AstType, AstValue, Definition, Directive, Document, FieldDefinition, TypeDefinition,
};
use crate::error::{Result, SchemaError};
use crate::schema::descriptions::default_crdt_for_field_kind;
use crate::schema::{relations, types};

/// CRDT assignments recorded per object per field during the build, needed
/// later when relation reconciliation promotes fields to the schema level.
pub(crate) type CTypeByFieldNameByObjName = HashMap<String, HashMap<String, CType>>;

/// Builds collection descriptors from a definition document.
pub fn collections_from_document(doc: &Document) -> Result<Vec<Collection>> {
    let mut collections = Vec::new();
    let mut ctypes = CTypeByFieldNameByObjName::new();

    for definition in &doc.definitions {
        match definition {
            Definition::Object(def) => {
                collections.push(collection_from_definition(def, &mut ctypes)?);
            }
            Definition::Interface(def) => {
                // Interfaces are schema-only declarations. The version is
                // left as default, marking the collection embedded.
                collections.push(Collection {
                    version: CollectionVersion::default(),
                    schema: schema_from_definition(def, &mut ctypes)?,
                });
            }
            Definition::Other => {}
        }
    }

    // Relation details depend on both sides of the relationship, so they can
    // only be reconciled once every collection has been built.
    relations::finalize_relations(&mut collections, &ctypes);

    Ok(collections)
}

fn collection_from_definition(
    def: &TypeDefinition,
    ctypes: &mut CTypeByFieldNameByObjName,
) -> Result<Collection> {
    let mut schema_fields = vec![SchemaFieldDescription {
        name: request::DOC_ID_FIELD_NAME.to_string(),
        kind: FieldKind::DocID,
        typ: CType::NoneCrdt,
    }];
    let mut collection_fields = vec![CollectionFieldDescription {
        name: request::DOC_ID_FIELD_NAME.to_string(),
        ..Default::default()
    }];

    let mut indexes = Vec::new();
    let mut encrypted_indexes = Vec::new();
    let mut vector_embeddings = Vec::new();
    let mut seen_fields = HashSet::new();

    for field in &def.fields {
        if !seen_fields.insert(field.name.clone()) {
            return Err(SchemaError::DuplicateField {
                object_name: def.name.clone(),
                field_name: field.name.clone(),
            });
        }

        let (new_schema_fields, new_collection_fields) =
            fields_from_ast(field, &def.name, ctypes, false)?;
        schema_fields.extend(new_schema_fields);
        collection_fields.extend(new_collection_fields);

        for directive in &field.directives {
            match directive.name.as_str() {
                types::INDEX_DIRECTIVE_LABEL => {
                    indexes.push(index_from_directive(directive, Some(&field.name))?);
                }
                types::ENCRYPTED_INDEX_DIRECTIVE_LABEL => {
                    encrypted_indexes.push(encrypted_index_from_directive(directive, &field.name)?);
                }
                types::EMBEDDING_DIRECTIVE_LABEL => {
                    vector_embeddings.push(embedding_from_directive(directive, &field.name)?);
                }
                _ => {}
            }
        }
    }

    sort_fields_doc_id_first(&mut schema_fields, |f| &f.name);
    sort_fields_doc_id_first(&mut collection_fields, |f| &f.name);

    let mut policy = None;
    let mut materialized: Option<bool> = None;
    let mut branchable: Option<bool> = None;

    for directive in &def.directives {
        match directive.name.as_str() {
            types::INDEX_DIRECTIVE_LABEL => {
                indexes.push(index_from_directive(directive, None)?);
            }
            types::POLICY_DIRECTIVE_LABEL => {
                policy = Some(policy_from_directive(directive)?);
            }
            types::MATERIALIZED_DIRECTIVE_LABEL => {
                let value = bool_if_arg(directive, types::MATERIALIZED_DIRECTIVE_PROP_IF)?;
                // Repeated applications combine with OR; an explicit true is
                // never downgraded by a later false.
                materialized = Some(materialized.unwrap_or(false) || value);
            }
            types::BRANCHABLE_DIRECTIVE_LABEL => {
                if branchable.is_none() {
                    branchable = Some(bool_if_arg(directive, types::BRANCHABLE_DIRECTIVE_PROP_IF)?);
                }
            }
            _ => {}
        }
    }

    Ok(Collection {
        version: CollectionVersion {
            name: Some(def.name.clone()),
            policy,
            fields: collection_fields,
            indexes,
            encrypted_indexes,
            vector_embeddings,
            is_materialized: materialized.unwrap_or(true),
            is_branchable: branchable.unwrap_or(false),
            ..Default::default()
        },
        schema: Schema {
            name: def.name.clone(),
            fields: schema_fields,
        },
    })
}

fn schema_from_definition(
    def: &TypeDefinition,
    ctypes: &mut CTypeByFieldNameByObjName,
) -> Result<Schema> {
    let mut fields = Vec::new();
    let mut seen_fields = HashSet::new();

    for field in &def.fields {
        if !seen_fields.insert(field.name.clone()) {
            return Err(SchemaError::DuplicateField {
                object_name: def.name.clone(),
                field_name: field.name.clone(),
            });
        }

        // Schema-only types have no collection fields, so those returned
        // here can safely be discarded.
        let (new_fields, _) = fields_from_ast(field, &def.name, ctypes, true)?;
        fields.extend(new_fields);
    }

    fields.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Schema {
        name: def.name.clone(),
        fields,
    })
}

fn sort_fields_doc_id_first<T>(fields: &mut [T], name: impl Fn(&T) -> &str) {
    fields.sort_by(|a, b| {
        if name(a) == request::DOC_ID_FIELD_NAME {
            std::cmp::Ordering::Less
        } else if name(b) == request::DOC_ID_FIELD_NAME {
            std::cmp::Ordering::Greater
        } else {
            name(a).cmp(name(b))
        }
    });
}

fn fields_from_ast(
    field: &FieldDefinition,
    host_object_name: &str,
    ctypes: &mut CTypeByFieldNameByObjName,
    schema_only: bool,
) -> Result<(Vec<SchemaFieldDescription>, Vec<CollectionFieldDescription>)> {
    let Some(ast_type) = &field.ty else {
        return Err(SchemaError::FieldTypeNotSpecified {
            object_name: host_object_name.to_string(),
            field_name: field.name.clone(),
        });
    };
    let kind = ast_type_to_kind(ast_type)?;
    let ctype = set_crdt_type(field, &kind)?;

    ctypes
        .entry(host_object_name.to_string())
        .or_default()
        .insert(field.name.clone(), ctype);

    let default_value = default_from_directive(field, &kind)?;
    let size = size_constraint_from_directive(field, &kind)?;

    let mut schema_fields = Vec::new();
    let mut collection_fields = Vec::new();

    if kind.is_object() {
        let relation_name = relationship_name(field, host_object_name, kind.underlying());

        if kind.is_array() {
            if schema_only {
                schema_fields.push(SchemaFieldDescription {
                    name: field.name.clone(),
                    kind,
                    typ: CType::NoneCrdt,
                });
            } else {
                collection_fields.push(CollectionFieldDescription {
                    name: field.name.clone(),
                    kind: Some(kind),
                    relation_name: Some(relation_name),
                    ..Default::default()
                });
            }
        } else {
            collection_fields.push(CollectionFieldDescription {
                name: format!("{}_id", field.name),
                kind: Some(FieldKind::DocID),
                relation_name: Some(relation_name.clone()),
                ..Default::default()
            });
            collection_fields.push(CollectionFieldDescription {
                name: field.name.clone(),
                kind: Some(kind.clone()),
                relation_name: Some(relation_name),
                ..Default::default()
            });

            // Only primary fields exist on the schema. If the primary side
            // is implied (e.g. one-many) the relation pass adds it later.
            if field.find_directive(types::PRIMARY_DIRECTIVE_LABEL).is_some() {
                schema_fields.push(SchemaFieldDescription {
                    name: field.name.clone(),
                    kind,
                    typ: ctype,
                });
            }
        }
    } else {
        schema_fields.push(SchemaFieldDescription {
            name: field.name.clone(),
            kind,
            typ: ctype,
        });
        collection_fields.push(CollectionFieldDescription {
            name: field.name.clone(),
            default_value,
            size,
            ..Default::default()
        });
    }

    Ok((schema_fields, collection_fields))
}

/// Resolves an AST type expression into a field kind.
///
/// Unrecognised type names become object (relation) kinds; whether the named
/// collection actually exists is not checked here.
pub fn ast_type_to_kind(ty: &AstType) -> Result<FieldKind> {
    match ty {
        AstType::Named(name) => Ok(match name.as_str() {
            "ID" => FieldKind::DocID,
            "Boolean" => FieldKind::NillableBool,
            "Int" => FieldKind::NillableInt,
            "Float" | "Float64" => FieldKind::NillableFloat64,
            "Float32" => FieldKind::NillableFloat32,
            "DateTime" => FieldKind::NillableDateTime,
            "String" => FieldKind::NillableString,
            "Blob" => FieldKind::NillableBlob,
            "JSON" => FieldKind::NillableJson,
            _ => FieldKind::Object {
                name: name.clone(),
                is_array: false,
            },
        }),

        AstType::List(inner) => match inner.as_ref() {
            AstType::NonNull(element) => match element.as_ref() {
                AstType::Named(name) => Ok(match name.as_str() {
                    "Boolean" => FieldKind::BoolArray,
                    "Int" => FieldKind::IntArray,
                    "Float" | "Float64" => FieldKind::Float64Array,
                    "Float32" => FieldKind::Float32Array,
                    "DateTime" => FieldKind::DateTimeArray,
                    "String" => FieldKind::StringArray,
                    "Blob" => FieldKind::BlobArray,
                    "JSON" => FieldKind::JsonArray,
                    _ => {
                        return Err(SchemaError::NonNullForTypeNotSupported {
                            type_name: name.clone(),
                        });
                    }
                }),
                _ => Err(SchemaError::NonNullNotSupported),
            },
            AstType::Named(name) => Ok(match name.as_str() {
                "Boolean" => FieldKind::NillableBoolArray,
                "Int" => FieldKind::NillableIntArray,
                "Float" | "Float64" => FieldKind::NillableFloat64Array,
                "Float32" => FieldKind::NillableFloat32Array,
                "DateTime" => FieldKind::NillableDateTimeArray,
                "String" => FieldKind::NillableStringArray,
                "Blob" => FieldKind::NillableBlobArray,
                "JSON" => FieldKind::NillableJsonArray,
                _ => FieldKind::Object {
                    name: name.clone(),
                    is_array: true,
                },
            }),
            AstType::List(_) => Err(SchemaError::TypeNotFound {
                type_name: "nested list".to_string(),
            }),
        },

        AstType::NonNull(_) => Err(SchemaError::NonNullNotSupported),
    }
}

fn set_crdt_type(field: &FieldDefinition, kind: &FieldKind) -> Result<CType> {
    if let Some(directive) = field.find_directive(types::CRDT_DIRECTIVE_LABEL) {
        for arg in &directive.arguments {
            if arg.name == types::CRDT_DIRECTIVE_PROP_TYPE {
                let name = arg.value.as_str().or_else(|| arg.value.as_enum()).ok_or(
                    SchemaError::InvalidDirectiveArgument {
                        directive: types::CRDT_DIRECTIVE_LABEL.to_string(),
                        arg: arg.name.clone(),
                    },
                )?;
                let ctype = match name {
                    "lww" => CType::LwwRegister,
                    "pncounter" => CType::PnCounter,
                    "pcounter" => CType::PCounter,
                    _ => {
                        return Err(CoreError::InvalidCrdtType {
                            field_name: field.name.clone(),
                            crdt_type: name.to_string(),
                        }
                        .into());
                    }
                };
                if !ctype.is_compatible_with(kind) {
                    return Err(CoreError::CrdtKindMismatch {
                        ctype: ctype.to_string(),
                        kind: kind.to_string(),
                    }
                    .into());
                }
                return Ok(ctype);
            }
        }
    }

    if kind.is_object() {
        if kind.is_array() {
            return Ok(CType::NoneCrdt);
        }
        return Ok(CType::LwwRegister);
    }

    Ok(default_crdt_for_field_kind(kind))
}

/// The relation name, from `@relation(name:)` if present, otherwise derived
/// from the two participating type names so that both sides agree on it
/// regardless of declaration order.
fn relationship_name(field: &FieldDefinition, host_name: &str, target_name: &str) -> String {
    if let Some(directive) = field.find_directive(types::RELATION_DIRECTIVE_LABEL) {
        for arg in &directive.arguments {
            if arg.name == types::RELATION_DIRECTIVE_PROP_NAME {
                if let Some(name) = arg.value.as_str() {
                    return name.to_string();
                }
            }
        }
    }

    let a = host_name.to_lowercase();
    let b = target_name.to_lowercase();
    if a < b {
        format!("{a}_{b}")
    } else {
        format!("{b}_{a}")
    }
}

/// The directive-argument name a default value for the given kind must be
/// passed under. Arrays are matched by element type.
fn default_prop_for_kind(kind: &FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::NillableBool | FieldKind::BoolArray | FieldKind::NillableBoolArray => {
            Some(types::DEFAULT_DIRECTIVE_PROP_BOOL)
        }
        FieldKind::NillableInt | FieldKind::IntArray | FieldKind::NillableIntArray => {
            Some(types::DEFAULT_DIRECTIVE_PROP_INT)
        }
        FieldKind::NillableFloat32 | FieldKind::Float32Array | FieldKind::NillableFloat32Array => {
            Some(types::DEFAULT_DIRECTIVE_PROP_FLOAT32)
        }
        FieldKind::NillableFloat64 | FieldKind::Float64Array | FieldKind::NillableFloat64Array => {
            Some(types::DEFAULT_DIRECTIVE_PROP_FLOAT64)
        }
        FieldKind::NillableDateTime
        | FieldKind::DateTimeArray
        | FieldKind::NillableDateTimeArray => Some(types::DEFAULT_DIRECTIVE_PROP_DATETIME),
        FieldKind::DocID
        | FieldKind::NillableString
        | FieldKind::StringArray
        | FieldKind::NillableStringArray => Some(types::DEFAULT_DIRECTIVE_PROP_STRING),
        FieldKind::NillableBlob | FieldKind::BlobArray | FieldKind::NillableBlobArray => {
            Some(types::DEFAULT_DIRECTIVE_PROP_BLOB)
        }
        FieldKind::NillableJson | FieldKind::JsonArray | FieldKind::NillableJsonArray => {
            Some(types::DEFAULT_DIRECTIVE_PROP_JSON)
        }
        FieldKind::None | FieldKind::Object { .. } => None,
    }
}

fn default_from_directive(
    field: &FieldDefinition,
    kind: &FieldKind,
) -> Result<Option<serde_json::Value>> {
    let Some(directive) = field.find_directive(types::DEFAULT_DIRECTIVE_LABEL) else {
        return Ok(None);
    };

    let Some(expected_prop) = default_prop_for_kind(kind) else {
        return Err(SchemaError::DefaultValueNotAllowed {
            field_name: field.name.clone(),
            kind: kind.to_string(),
        });
    };

    if directive.arguments.len() != 1 {
        return Err(SchemaError::DefaultValueOneArgument {
            field_name: field.name.clone(),
        });
    }

    let arg = &directive.arguments[0];
    // The legacy float prop is accepted wherever float64 is.
    let matches_float64_alias = expected_prop == types::DEFAULT_DIRECTIVE_PROP_FLOAT64
        && arg.name == types::DEFAULT_DIRECTIVE_PROP_FLOAT;
    if arg.name != expected_prop && !matches_float64_alias {
        return Err(SchemaError::DefaultValueInvalidArgument {
            field_name: field.name.clone(),
            arg: arg.name.clone(),
        });
    }

    Ok(Some(arg.value.to_json()))
}

fn size_constraint_from_directive(field: &FieldDefinition, kind: &FieldKind) -> Result<Option<u32>> {
    let Some(directive) = field.find_directive(types::CONSTRAINTS_DIRECTIVE_LABEL) else {
        return Ok(None);
    };

    let mut size = None;
    for arg in &directive.arguments {
        if arg.name == types::CONSTRAINTS_DIRECTIVE_PROP_SIZE {
            if !kind.is_array() {
                return Err(SchemaError::ConstraintsNotSupported {
                    field_name: field.name.clone(),
                    kind: kind.to_string(),
                });
            }
            let value = arg.value.as_int().and_then(|v| u32::try_from(v).ok()).ok_or(
                SchemaError::InvalidDirectiveArgument {
                    directive: types::CONSTRAINTS_DIRECTIVE_LABEL.to_string(),
                    arg: arg.name.clone(),
                },
            )?;
            size = Some(value);
        } else {
            return Err(SchemaError::UnknownDirectiveArgument {
                directive: types::CONSTRAINTS_DIRECTIVE_LABEL.to_string(),
                arg: arg.name.clone(),
            });
        }
    }
    Ok(size)
}

/// Returns true if the name is a valid index name. Valid index names must
/// start with a letter or underscore, and can contain letters, numbers, and
/// underscores.
#[must_use]
pub fn is_valid_index_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn index_direction(value: &AstValue) -> Result<bool> {
    let direction = value
        .as_enum()
        .or_else(|| value.as_str())
        .ok_or(SchemaError::IndexInvalidArgument)?;
    match direction {
        types::FIELD_ORDER_ASC => Ok(false),
        types::FIELD_ORDER_DESC => Ok(true),
        _ => Err(SchemaError::IndexInvalidArgument),
    }
}

/// Parses an `@index` directive into an index description.
///
/// When the directive decorates a field, that field is prepended to the
/// `includes` list (unless already given as its first entry) and the
/// directive-level `direction` applies both to it and to any `includes`
/// entry lacking an explicit direction.
fn index_from_directive(
    directive: &Directive,
    decorated_field: Option<&str>,
) -> Result<IndexDescription> {
    let mut desc = IndexDescription::default();
    let mut default_descending = false;
    let mut includes: Vec<(String, Option<bool>)> = Vec::new();

    for arg in &directive.arguments {
        match arg.name.as_str() {
            types::INDEX_DIRECTIVE_PROP_NAME => {
                let name = arg.value.as_str().ok_or(SchemaError::IndexInvalidArgument)?;
                if !is_valid_index_name(name) {
                    return Err(SchemaError::IndexInvalidName {
                        name: name.to_string(),
                    });
                }
                desc.name = name.to_string();
            }
            types::INDEX_DIRECTIVE_PROP_UNIQUE => {
                desc.unique = arg.value.as_bool().ok_or(SchemaError::IndexInvalidArgument)?;
            }
            types::INDEX_DIRECTIVE_PROP_DIRECTION => {
                default_descending = index_direction(&arg.value)?;
            }
            types::INDEX_DIRECTIVE_PROP_INCLUDES => {
                let AstValue::List(entries) = &arg.value else {
                    return Err(SchemaError::IndexInvalidArgument);
                };
                for entry in entries {
                    let AstValue::Object(props) = entry else {
                        return Err(SchemaError::IndexInvalidArgument);
                    };
                    let mut field_name = None;
                    let mut descending = None;
                    for (prop, value) in props {
                        match prop.as_str() {
                            types::INCLUDES_PROP_FIELD => {
                                field_name = Some(
                                    value
                                        .as_str()
                                        .ok_or(SchemaError::IndexInvalidArgument)?
                                        .to_string(),
                                );
                            }
                            types::INCLUDES_PROP_DIRECTION => {
                                descending = Some(index_direction(value)?);
                            }
                            _ => {
                                return Err(SchemaError::IndexUnknownArgument { arg: prop.clone() });
                            }
                        }
                    }
                    let field_name = field_name.ok_or(SchemaError::IndexInvalidArgument)?;
                    includes.push((field_name, descending));
                }
            }
            _ => {
                return Err(SchemaError::IndexUnknownArgument {
                    arg: arg.name.clone(),
                });
            }
        }
    }

    if let Some(field_name) = decorated_field {
        let already_first = includes.first().is_some_and(|(name, _)| name == field_name);
        if !already_first {
            includes.insert(0, (field_name.to_string(), Some(default_descending)));
        }
    }

    desc.fields = includes
        .into_iter()
        .map(|(name, descending)| IndexedFieldDescription {
            name,
            descending: descending.unwrap_or(default_descending),
        })
        .collect();

    if desc.fields.is_empty() {
        return Err(SchemaError::IndexMissingFields);
    }

    Ok(desc)
}

fn encrypted_index_from_directive(
    directive: &Directive,
    field_name: &str,
) -> Result<EncryptedIndexCreateRequest> {
    let mut index_type = EncryptedIndexType::Equality;
    for arg in &directive.arguments {
        if arg.name == types::ENCRYPTED_INDEX_DIRECTIVE_PROP_TYPE {
            let name = arg.value.as_enum().or_else(|| arg.value.as_str()).ok_or(
                SchemaError::InvalidDirectiveArgument {
                    directive: types::ENCRYPTED_INDEX_DIRECTIVE_LABEL.to_string(),
                    arg: arg.name.clone(),
                },
            )?;
            if name != types::ENCRYPTED_INDEX_TYPE_EQUALITY {
                return Err(SchemaError::InvalidEncryptedIndexType {
                    type_name: name.to_string(),
                });
            }
            index_type = EncryptedIndexType::Equality;
        } else {
            return Err(SchemaError::UnknownDirectiveArgument {
                directive: types::ENCRYPTED_INDEX_DIRECTIVE_LABEL.to_string(),
                arg: arg.name.clone(),
            });
        }
    }
    Ok(EncryptedIndexCreateRequest {
        field_name: field_name.to_string(),
        index_type,
    })
}

fn embedding_from_directive(
    directive: &Directive,
    field_name: &str,
) -> Result<VectorEmbeddingDescription> {
    let invalid = |arg: &str| SchemaError::InvalidDirectiveArgument {
        directive: types::EMBEDDING_DIRECTIVE_LABEL.to_string(),
        arg: arg.to_string(),
    };

    let mut embedding = VectorEmbeddingDescription {
        field_name: field_name.to_string(),
        ..Default::default()
    };
    for arg in &directive.arguments {
        match arg.name.as_str() {
            types::EMBEDDING_DIRECTIVE_PROP_PROVIDER => {
                embedding.provider = arg.value.as_str().ok_or_else(|| invalid(&arg.name))?.to_string();
            }
            types::EMBEDDING_DIRECTIVE_PROP_MODEL => {
                embedding.model = arg.value.as_str().ok_or_else(|| invalid(&arg.name))?.to_string();
            }
            types::EMBEDDING_DIRECTIVE_PROP_URL => {
                embedding.url = arg.value.as_str().ok_or_else(|| invalid(&arg.name))?.to_string();
            }
            types::EMBEDDING_DIRECTIVE_PROP_TEMPLATE => {
                embedding.template = arg.value.as_str().ok_or_else(|| invalid(&arg.name))?.to_string();
            }
            types::EMBEDDING_DIRECTIVE_PROP_FIELDS => {
                let AstValue::List(items) = &arg.value else {
                    return Err(invalid(&arg.name));
                };
                embedding.fields = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string).ok_or_else(|| invalid(&arg.name)))
                    .collect::<Result<_>>()?;
            }
            _ => {
                return Err(SchemaError::UnknownDirectiveArgument {
                    directive: types::EMBEDDING_DIRECTIVE_LABEL.to_string(),
                    arg: arg.name.clone(),
                });
            }
        }
    }
    Ok(embedding)
}

fn policy_from_directive(directive: &Directive) -> Result<PolicyDescription> {
    let mut policy = PolicyDescription::default();
    for arg in &directive.arguments {
        match arg.name.as_str() {
            types::POLICY_DIRECTIVE_PROP_ID => {
                policy.id = arg
                    .value
                    .as_str()
                    .ok_or(SchemaError::InvalidDirectiveArgument {
                        directive: types::POLICY_DIRECTIVE_LABEL.to_string(),
                        arg: arg.name.clone(),
                    })?
                    .to_string();
            }
            types::POLICY_DIRECTIVE_PROP_RESOURCE => {
                policy.resource_name = arg
                    .value
                    .as_str()
                    .ok_or(SchemaError::InvalidDirectiveArgument {
                        directive: types::POLICY_DIRECTIVE_LABEL.to_string(),
                        arg: arg.name.clone(),
                    })?
                    .to_string();
            }
            _ => {
                return Err(SchemaError::UnknownDirectiveArgument {
                    directive: types::POLICY_DIRECTIVE_LABEL.to_string(),
                    arg: arg.name.clone(),
                });
            }
        }
    }
    Ok(policy)
}

/// Reads an optional `if:` boolean argument, defaulting to true when the
/// directive carries no arguments.
fn bool_if_arg(directive: &Directive, prop: &str) -> Result<bool> {
    let mut value = true;
    for arg in &directive.arguments {
        if arg.name == prop {
            value = arg.value.as_bool().ok_or(SchemaError::InvalidDirectiveArgument {
                directive: directive.name.clone(),
                arg: arg.name.clone(),
            })?;
        } else {
            return Err(SchemaError::UnknownDirectiveArgument {
                directive: directive.name.clone(),
                arg: arg.name.clone(),
            });
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Argument;

    fn doc(definitions: Vec<Definition>) -> Document {
        Document::new(definitions)
    }

    fn user_with_field(field: FieldDefinition) -> Document {
        doc(vec![Definition::Object(
            TypeDefinition::new("User").field(field),
        )])
    }

    #[test]
    fn test_doc_id_is_seeded_and_first() {
        let collections = collections_from_document(&user_with_field(FieldDefinition::new(
            "name",
            AstType::named("String"),
        )))
        .unwrap();

        let user = &collections[0];
        assert_eq!(user.schema.fields[0].name, "_docID");
        assert_eq!(user.schema.fields[0].kind, FieldKind::DocID);
        assert_eq!(user.schema.fields[0].typ, CType::NoneCrdt);
        assert_eq!(user.version.fields[0].name, "_docID");
    }

    #[test]
    fn test_fields_sorted_lexicographically_after_doc_id() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .field(FieldDefinition::new("zeta", AstType::named("String")))
                .field(FieldDefinition::new("alpha", AstType::named("Int")))
                .field(FieldDefinition::new("mid", AstType::named("Boolean"))),
        )]))
        .unwrap();

        let names: Vec<_> = collections[0]
            .schema
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["_docID", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_scalar_kinds_resolved() {
        assert_eq!(
            ast_type_to_kind(&AstType::named("Float")).unwrap(),
            FieldKind::NillableFloat64
        );
        assert_eq!(
            ast_type_to_kind(&AstType::list(AstType::non_null(AstType::named("Int")))).unwrap(),
            FieldKind::IntArray
        );
        assert_eq!(
            ast_type_to_kind(&AstType::list(AstType::named("Book"))).unwrap(),
            FieldKind::Object {
                name: "Book".to_string(),
                is_array: true
            }
        );
        assert!(matches!(
            ast_type_to_kind(&AstType::non_null(AstType::named("Int"))),
            Err(SchemaError::NonNullNotSupported)
        ));
        assert!(matches!(
            ast_type_to_kind(&AstType::list(AstType::non_null(AstType::named("Book")))),
            Err(SchemaError::NonNullForTypeNotSupported { .. })
        ));
    }

    #[test]
    fn test_missing_field_type_errors() {
        let field = FieldDefinition {
            name: "name".to_string(),
            ty: None,
            directives: Vec::new(),
        };
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::FieldTypeNotSpecified { .. }));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .field(FieldDefinition::new("name", AstType::named("String")))
                .field(FieldDefinition::new("name", AstType::named("Int"))),
        )]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn test_relation_name_is_symmetric() {
        for (host, target) in [("User", "Address"), ("Address", "User")] {
            let name = relationship_name(
                &FieldDefinition::new("other", AstType::named(target)),
                host,
                target,
            );
            assert_eq!(name, "address_user");
        }
    }

    #[test]
    fn test_singular_relation_produces_id_field() {
        let collections = collections_from_document(&doc(vec![
            Definition::Object(
                TypeDefinition::new("User")
                    .field(FieldDefinition::new("address", AstType::named("Address"))),
            ),
            Definition::Object(
                TypeDefinition::new("Address")
                    .field(FieldDefinition::new("city", AstType::named("String"))),
            ),
        ]))
        .unwrap();

        let user = &collections[0];
        let address_field = user
            .version
            .fields
            .iter()
            .find(|f| f.name == "address")
            .unwrap();
        let id_field = user
            .version
            .fields
            .iter()
            .find(|f| f.name == "address_id")
            .unwrap();

        assert_eq!(
            address_field.kind,
            Some(FieldKind::Object {
                name: "Address".to_string(),
                is_array: false
            })
        );
        assert_eq!(id_field.kind, Some(FieldKind::DocID));
        assert_eq!(address_field.relation_name.as_deref(), Some("address_user"));
        assert_eq!(id_field.relation_name.as_deref(), Some("address_user"));
    }

    #[test]
    fn test_crdt_directive() {
        let field = FieldDefinition::new("points", AstType::named("Int")).directive(
            Directive::new("crdt").arg("type", AstValue::Enum("pncounter".to_string())),
        );
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        let points = collections[0].schema.get_field_by_name("points").unwrap();
        assert_eq!(points.typ, CType::PnCounter);
    }

    #[test]
    fn test_counter_crdt_rejected_for_strings() {
        let field = FieldDefinition::new("name", AstType::named("String")).directive(
            Directive::new("crdt").arg("type", AstValue::Enum("pncounter".to_string())),
        );
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Core(CoreError::CrdtKindMismatch { .. })
        ));
    }

    #[test]
    fn test_default_value() {
        let field = FieldDefinition::new("points", AstType::named("Int"))
            .directive(Directive::new("default").arg("int", AstValue::Int(5)));
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        let points = collections[0]
            .version
            .fields
            .iter()
            .find(|f| f.name == "points")
            .unwrap();
        assert_eq!(points.default_value, Some(serde_json::json!(5)));
    }

    #[test]
    fn test_default_value_prop_must_match_kind() {
        let field = FieldDefinition::new("points", AstType::named("Int"))
            .directive(Directive::new("default").arg("string", AstValue::String("5".to_string())));
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::DefaultValueInvalidArgument { .. }));
    }

    #[test]
    fn test_default_value_requires_one_argument() {
        let field = FieldDefinition::new("points", AstType::named("Int")).directive(
            Directive::new("default")
                .arg("int", AstValue::Int(5))
                .arg("string", AstValue::String("5".to_string())),
        );
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::DefaultValueOneArgument { .. }));
    }

    #[test]
    fn test_default_value_not_allowed_on_relations() {
        let field = FieldDefinition::new("address", AstType::named("Address"))
            .directive(Directive::new("default").arg("string", AstValue::String("x".to_string())));
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::DefaultValueNotAllowed { .. }));
    }

    #[test]
    fn test_size_constraint_arrays_only() {
        let field = FieldDefinition::new("scores", AstType::list(AstType::named("Int")))
            .directive(Directive::new("constraints").arg("size", AstValue::Int(10)));
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        let scores = collections[0]
            .version
            .fields
            .iter()
            .find(|f| f.name == "scores")
            .unwrap();
        assert_eq!(scores.size, Some(10));

        let field = FieldDefinition::new("score", AstType::named("Int"))
            .directive(Directive::new("constraints").arg("size", AstValue::Int(10)));
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintsNotSupported { .. }));
    }

    #[test]
    fn test_index_names() {
        for name in ["", "1_user", "user name", "user!name"] {
            assert!(!is_valid_index_name(name), "{name:?} should be invalid");
        }
        for name in ["userIndex", "_private"] {
            assert!(is_valid_index_name(name), "{name:?} should be valid");
        }
    }

    #[test]
    fn test_type_level_index_from_includes() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .directive(Directive::new("index").arg(
                    "includes",
                    AstValue::List(vec![AstValue::Object(vec![(
                        "field".to_string(),
                        AstValue::String("name".to_string()),
                    )])]),
                ))
                .field(FieldDefinition::new("name", AstType::named("String"))),
        )]))
        .unwrap();

        let indexes = &collections[0].version.indexes;
        assert_eq!(indexes.len(), 1);
        assert_eq!(
            indexes[0].fields,
            vec![IndexedFieldDescription {
                name: "name".to_string(),
                descending: false
            }]
        );
        assert!(!indexes[0].unique);
    }

    #[test]
    fn test_field_index_direction_inherited_by_includes() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .field(
                    FieldDefinition::new("name", AstType::named("String")).directive(
                        Directive::new("index")
                            .arg("direction", AstValue::Enum("DESC".to_string()))
                            .arg(
                                "includes",
                                AstValue::List(vec![AstValue::Object(vec![(
                                    "field".to_string(),
                                    AstValue::String("age".to_string()),
                                )])]),
                            ),
                    ),
                )
                .field(FieldDefinition::new("age", AstType::named("Int"))),
        )]))
        .unwrap();

        let index = &collections[0].version.indexes[0];
        assert_eq!(
            index.fields,
            vec![
                IndexedFieldDescription {
                    name: "name".to_string(),
                    descending: true
                },
                IndexedFieldDescription {
                    name: "age".to_string(),
                    descending: true
                },
            ]
        );
    }

    #[test]
    fn test_field_index_not_duplicated_when_first_include() {
        let field = FieldDefinition::new("name", AstType::named("String")).directive(
            Directive::new("index").arg(
                "includes",
                AstValue::List(vec![AstValue::Object(vec![
                    ("field".to_string(), AstValue::String("name".to_string())),
                    ("direction".to_string(), AstValue::Enum("DESC".to_string())),
                ])]),
            ),
        );
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        let index = &collections[0].version.indexes[0];
        assert_eq!(index.fields.len(), 1);
        assert!(index.fields[0].descending);
    }

    #[test]
    fn test_type_level_index_requires_fields() {
        let err = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User").directive(Directive::new("index")),
        )]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::IndexMissingFields));
    }

    #[test]
    fn test_index_unknown_argument() {
        let err = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .directive(Directive::new("index").arg("bogus", AstValue::Boolean(true))),
        )]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::IndexUnknownArgument { .. }));
    }

    #[test]
    fn test_encrypted_index_defaults_to_equality() {
        let field = FieldDefinition::new("ssn", AstType::named("String"))
            .directive(Directive::new("encryptedIndex"));
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        assert_eq!(
            collections[0].version.encrypted_indexes,
            vec![EncryptedIndexCreateRequest {
                field_name: "ssn".to_string(),
                index_type: EncryptedIndexType::Equality,
            }]
        );

        let field = FieldDefinition::new("ssn", AstType::named("String")).directive(
            Directive::new("encryptedIndex").arg("type", AstValue::Enum("range".to_string())),
        );
        let err = collections_from_document(&user_with_field(field)).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidEncryptedIndexType { .. }));
    }

    #[test]
    fn test_policy_directive() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .directive(
                    Directive::new("policy")
                        .arg("id", AstValue::String("abc123".to_string()))
                        .arg("resource", AstValue::String("user".to_string())),
                )
                .field(FieldDefinition::new("name", AstType::named("String"))),
        )]))
        .unwrap();

        let policy = collections[0].version.policy.as_ref().unwrap();
        assert_eq!(policy.id, "abc123");
        assert_eq!(policy.resource_name, "user");
    }

    #[test]
    fn test_materialized_or_combines() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("View")
                .directive(
                    Directive::new("materialized")
                        .arg("if", AstValue::Boolean(false)),
                )
                .directive(Directive::new("materialized"))
                .directive(
                    Directive::new("materialized")
                        .arg("if", AstValue::Boolean(false)),
                ),
        )]))
        .unwrap();
        assert!(collections[0].version.is_materialized);

        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("View").directive(
                Directive::new("materialized").arg("if", AstValue::Boolean(false)),
            ),
        )]))
        .unwrap();
        assert!(!collections[0].version.is_materialized);
    }

    #[test]
    fn test_branchable_first_occurrence_wins() {
        let collections = collections_from_document(&doc(vec![Definition::Object(
            TypeDefinition::new("User")
                .directive(Directive::new("branchable"))
                .directive(Directive::new("branchable").arg("if", AstValue::Boolean(false))),
        )]))
        .unwrap();
        assert!(collections[0].version.is_branchable);

        let collections =
            collections_from_document(&doc(vec![Definition::Object(TypeDefinition::new("User"))]))
                .unwrap();
        assert!(!collections[0].version.is_branchable);
    }

    #[test]
    fn test_embedding_directive() {
        let field = FieldDefinition::new(
            "name_v",
            AstType::list(AstType::non_null(AstType::named("Float32"))),
        )
        .directive(
            Directive::new("embedding")
                .arg("provider", AstValue::String("openai".to_string()))
                .arg("model", AstValue::String("text-embedding-3-small".to_string()))
                .arg(
                    "fields",
                    AstValue::List(vec![AstValue::String("name".to_string())]),
                ),
        );
        let collections = collections_from_document(&user_with_field(field)).unwrap();
        let embedding = &collections[0].version.vector_embeddings[0];
        assert_eq!(embedding.field_name, "name_v");
        assert_eq!(embedding.provider, "openai");
        assert_eq!(embedding.fields, vec!["name".to_string()]);
    }

    #[test]
    fn test_interface_builds_embedded_collection() {
        let collections = collections_from_document(&doc(vec![Definition::Interface(
            TypeDefinition::new("Named")
                .field(FieldDefinition::new("name", AstType::named("String"))),
        )]))
        .unwrap();

        let embedded = &collections[0];
        assert!(embedded.is_embedded());
        assert_eq!(embedded.schema.name, "Named");
        // No synthetic _docID on schema-only declarations.
        assert!(embedded.schema.get_field_by_name("_docID").is_none());
        assert!(embedded.version.fields.is_empty());
    }

    #[test]
    fn test_unknown_definitions_skipped() {
        let collections = collections_from_document(&doc(vec![
            Definition::Other,
            Definition::Object(
                TypeDefinition::new("User")
                    .field(FieldDefinition::new("name", AstType::named("String"))),
            ),
        ]))
        .unwrap();
        assert_eq!(collections.len(), 1);
    }

    #[test]
    fn test_build_is_deterministic() {
        let document = doc(vec![
            Definition::Object(
                TypeDefinition::new("Book")
                    .field(FieldDefinition::new("title", AstType::named("String")))
                    .field(FieldDefinition::new(
                        "author",
                        AstType::named("Author"),
                    )),
            ),
            Definition::Object(
                TypeDefinition::new("Author")
                    .field(FieldDefinition::new("name", AstType::named("String")))
                    .field(FieldDefinition::new(
                        "books",
                        AstType::list(AstType::named("Book")),
                    )),
            ),
        ]);

        let first = collections_from_document(&document).unwrap();
        let second = collections_from_document(&document).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_directive_arg_builder() {
        let directive = Directive::new("relation").arg("name", AstValue::String("x".to_string()));
        assert_eq!(
            directive.arguments,
            vec![Argument {
                name: "name".to_string(),
                value: AstValue::String("x".to_string())
            }]
        );
    }
}
