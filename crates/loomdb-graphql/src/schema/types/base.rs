//! Filter operator blocks for the built-in scalar types.
//!
//! Each filterable scalar gets an `{Scalar}OperatorBlock` input plus, where
//! non-nillable array elements exist, a `NotNull{Scalar}OperatorBlock`
//! variant whose membership operators take non-null lists. Inline-array
//! element types additionally get `_any`/`_all`/`_none` list blocks.

use crate::gql::{InputObject, InputValue, TypeRef};

const EQ_DESCRIPTION: &str = "The equality operator, matches if the value is equal to the given value.";
const NE_DESCRIPTION: &str = "The inequality operator, matches if the value is not equal to the given value.";
const GT_DESCRIPTION: &str = "The greater-than operator.";
const GE_DESCRIPTION: &str = "The greater-than-or-equal operator.";
const LT_DESCRIPTION: &str = "The less-than operator.";
const LE_DESCRIPTION: &str = "The less-than-or-equal operator.";
const IN_DESCRIPTION: &str = "The membership operator, matches if the value is within the given set.";
const NIN_DESCRIPTION: &str = "The excluded-membership operator, matches if the value is not within the given set.";
const LIKE_DESCRIPTION: &str = "The like operator, matches if the value matches the given sub-string pattern.";
const NLIKE_DESCRIPTION: &str = "The not-like operator, matches if the value does not match the given sub-string pattern.";
const ILIKE_DESCRIPTION: &str = "The case-insensitive like operator.";
const NILIKE_DESCRIPTION: &str = "The case-insensitive not-like operator.";
const ANY_DESCRIPTION: &str = "Matches if any of the array elements satisfy the given block.";
const ALL_DESCRIPTION: &str = "Matches if all of the array elements satisfy the given block.";
const NONE_DESCRIPTION: &str = "Matches if none of the array elements satisfy the given block.";

struct BlockSpec<'a> {
    scalar: &'a str,
    ordered: bool,
    likeable: bool,
    /// Membership operators take lists of non-null elements.
    non_null_lists: bool,
    /// The name prefix, normally equal to the scalar name.
    name: &'a str,
}

fn scalar_operator_block(spec: &BlockSpec<'_>) -> InputObject {
    let list = if spec.non_null_lists {
        TypeRef::named_nn_list(spec.scalar)
    } else {
        TypeRef::named_list(spec.scalar)
    };

    let mut block = InputObject::new(format!("{}OperatorBlock", spec.name))
        .description(format!(
            "These are the set of filter operators available for use when filtering on {} values.",
            spec.name
        ))
        .field(InputValue::new("_eq", TypeRef::named(spec.scalar)).description(EQ_DESCRIPTION))
        .field(InputValue::new("_ne", TypeRef::named(spec.scalar)).description(NE_DESCRIPTION));

    if spec.ordered {
        block = block
            .field(InputValue::new("_gt", TypeRef::named(spec.scalar)).description(GT_DESCRIPTION))
            .field(InputValue::new("_ge", TypeRef::named(spec.scalar)).description(GE_DESCRIPTION))
            .field(InputValue::new("_lt", TypeRef::named(spec.scalar)).description(LT_DESCRIPTION))
            .field(InputValue::new("_le", TypeRef::named(spec.scalar)).description(LE_DESCRIPTION));
    }

    block = block
        .field(InputValue::new("_in", list.clone()).description(IN_DESCRIPTION))
        .field(InputValue::new("_nin", list).description(NIN_DESCRIPTION));

    if spec.likeable {
        block = block
            .field(InputValue::new("_like", TypeRef::named(TypeRef::STRING)).description(LIKE_DESCRIPTION))
            .field(InputValue::new("_nlike", TypeRef::named(TypeRef::STRING)).description(NLIKE_DESCRIPTION))
            .field(InputValue::new("_ilike", TypeRef::named(TypeRef::STRING)).description(ILIKE_DESCRIPTION))
            .field(InputValue::new("_nilike", TypeRef::named(TypeRef::STRING)).description(NILIKE_DESCRIPTION));
    }

    block
}

fn list_operator_block(element_block: &str, element_display: &str) -> InputObject {
    InputObject::new(format!("{element_block}ListOperatorBlock"))
        .description(format!(
            "These are the set of filter operators available for use when filtering on [{element_display}] values."
        ))
        .field(
            InputValue::new("_any", TypeRef::named(format!("{element_block}OperatorBlock")))
                .description(ANY_DESCRIPTION),
        )
        .field(
            InputValue::new("_all", TypeRef::named(format!("{element_block}OperatorBlock")))
                .description(ALL_DESCRIPTION),
        )
        .field(
            InputValue::new("_none", TypeRef::named(format!("{element_block}OperatorBlock")))
                .description(NONE_DESCRIPTION),
        )
}

/// Builds every built-in operator block, in a fixed order.
#[must_use]
pub fn operator_blocks() -> Vec<InputObject> {
    let mut blocks = Vec::new();

    // Scalars with inline-array element forms get nullable and non-null
    // variants plus list blocks.
    for scalar in ["Boolean", "Int", "Float32", "Float64", "String"] {
        let likeable = scalar == "String";
        let ordered = scalar != "Boolean" && scalar != "String";

        blocks.push(scalar_operator_block(&BlockSpec {
            scalar,
            ordered,
            likeable,
            non_null_lists: false,
            name: scalar,
        }));
        let not_null_name = format!("NotNull{scalar}");
        blocks.push(scalar_operator_block(&BlockSpec {
            scalar,
            ordered,
            likeable,
            non_null_lists: true,
            name: &not_null_name,
        }));
        blocks.push(list_operator_block(scalar, scalar));
        blocks.push(list_operator_block(&not_null_name, &format!("{scalar}!")));
    }

    blocks.push(scalar_operator_block(&BlockSpec {
        scalar: "DateTime",
        ordered: true,
        likeable: false,
        non_null_lists: false,
        name: "DateTime",
    }));

    blocks.push(scalar_operator_block(&BlockSpec {
        scalar: "Blob",
        ordered: false,
        likeable: true,
        non_null_lists: false,
        name: "Blob",
    }));
    blocks.push(scalar_operator_block(&BlockSpec {
        scalar: "Blob",
        ordered: false,
        likeable: true,
        non_null_lists: true,
        name: "NotNullBlob",
    }));

    blocks.push(scalar_operator_block(&BlockSpec {
        scalar: "ID",
        ordered: false,
        likeable: false,
        non_null_lists: true,
        name: "ID",
    }));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(blocks: &'a [InputObject], name: &str) -> &'a InputObject {
        blocks
            .iter()
            .find(|b| b.name == name)
            .unwrap_or_else(|| panic!("missing block {name}"))
    }

    #[test]
    fn test_string_block_has_like_operators() {
        let blocks = operator_blocks();
        let block = find(&blocks, "StringOperatorBlock");
        for op in ["_eq", "_ne", "_in", "_nin", "_like", "_nlike", "_ilike", "_nilike"] {
            assert!(block.fields().contains_key(op), "missing {op}");
        }
        assert!(!block.fields().contains_key("_gt"));
    }

    #[test]
    fn test_int_block_has_ordering_operators() {
        let blocks = operator_blocks();
        let block = find(&blocks, "IntOperatorBlock");
        for op in ["_eq", "_ne", "_gt", "_ge", "_lt", "_le", "_in", "_nin"] {
            assert!(block.fields().contains_key(op), "missing {op}");
        }
    }

    #[test]
    fn test_not_null_membership_lists() {
        let blocks = operator_blocks();
        let block = find(&blocks, "NotNullIntOperatorBlock");
        assert_eq!(
            block.fields()["_in"].ty,
            TypeRef::named_nn_list("Int")
        );

        let nullable = find(&blocks, "IntOperatorBlock");
        assert_eq!(nullable.fields()["_in"].ty, TypeRef::named_list("Int"));
    }

    #[test]
    fn test_list_blocks_reference_element_blocks() {
        let blocks = operator_blocks();
        let block = find(&blocks, "BooleanListOperatorBlock");
        assert_eq!(
            block.fields()["_any"].ty,
            TypeRef::named("BooleanOperatorBlock")
        );
        let nn = find(&blocks, "NotNullFloat64ListOperatorBlock");
        assert_eq!(
            nn.fields()["_none"].ty,
            TypeRef::named("NotNullFloat64OperatorBlock")
        );
    }
}
