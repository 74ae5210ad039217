//! Relation finalizer.
//!
//! A second pass over the complete collection set that reconciles both
//! sides of every declared relation: promoting implied primary sides into
//! the schema field list and injecting synthetic `<field>_id` foreign-key
//! fields.

use loomdb_core::{CType, Collection, FieldKind, SchemaFieldDescription};

use super::collection::CTypeByFieldNameByObjName;

/// Reconciles relations across the whole collection set.
///
/// Only singular object fields on non-embedded collections need work here;
/// array fields are always the secondary side. A relation target that does
/// not exist in the set is skipped: validating the document beyond its own
/// structure is not this pass's concern.
pub(crate) fn finalize_relations(
    collections: &mut [Collection],
    ctypes: &CTypeByFieldNameByObjName,
) {
    let snapshot = collections.to_vec();

    for collection in collections.iter_mut() {
        if collection.is_embedded() {
            continue;
        }
        let host_name = collection.name().to_string();

        for field_index in 0..collection.version.fields.len() {
            let field = &collection.version.fields[field_index];
            let Some(kind @ FieldKind::Object { name, is_array: false }) = &field.kind else {
                continue;
            };
            let target_name = name.clone();
            let field_name = field.name.clone();
            let relation_name = field.relation_name.clone().unwrap_or_default();
            let kind = kind.clone();

            // There can only be a one-one mapping between schema names in a
            // single document, so the first match is the only match.
            let Some(other) = snapshot.iter().find(|c| c.schema.name == target_name) else {
                continue;
            };

            let counterpart =
                other
                    .version
                    .get_field_by_relation(&relation_name, &host_name, &field_name);

            let counterpart_is_array = counterpart
                .is_some_and(|f| f.kind.as_ref().is_some_and(FieldKind::is_array));

            if (counterpart.is_none() || counterpart_is_array)
                && collection.schema.get_field_by_name(&field_name).is_none()
            {
                // A relation declared on only one side, or whose other side
                // is an array, makes this field the primary side. Add it to
                // the schema unless the user already declared it there.
                let typ = ctypes
                    .get(&collection.schema.name)
                    .and_then(|fields| fields.get(&field_name))
                    .copied()
                    .unwrap_or(CType::NoneCrdt);
                collection.schema.fields.push(SchemaFieldDescription {
                    name: field_name.clone(),
                    kind: kind.clone(),
                    typ,
                });
            }

            let other_is_embedded = other.version.fields.is_empty();
            if other_is_embedded {
                continue;
            }

            let Some(schema_index) = collection
                .schema
                .fields
                .iter()
                .position(|f| f.name == field_name)
            else {
                continue;
            };

            // Every 1-1 or 1-N relation to a non-embedded object gets an
            // `_id` schema field, inserted immediately after the object
            // field.
            let id_field_name = format!("{field_name}_id");
            if collection.schema.get_field_by_name(&id_field_name).is_none() {
                collection.schema.fields.insert(
                    schema_index + 1,
                    SchemaFieldDescription {
                        name: id_field_name,
                        kind: FieldKind::DocID,
                        typ: CType::LwwRegister,
                    },
                );
            }
        }
    }
}
