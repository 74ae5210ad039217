//! CRDT merge-strategy tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::FieldKind;

/// The CRDT type used to merge concurrent writes to a field.
///
/// The serialized form matches the `@crdt(type:)` directive spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CType {
    /// No merge strategy; used for synthetic fields such as `_docID`.
    #[default]
    #[serde(rename = "none")]
    NoneCrdt,
    /// Last-write-wins register.
    #[serde(rename = "lww")]
    LwwRegister,
    /// Positive-negative counter.
    #[serde(rename = "pncounter")]
    PnCounter,
    /// Positive-only counter.
    #[serde(rename = "pcounter")]
    PCounter,
}

impl CType {
    /// Returns true if this CRDT type may be assigned to a field of the
    /// given kind.
    ///
    /// Counters only make sense for singular numeric fields; everything
    /// else accepts any register-style type.
    #[must_use]
    pub fn is_compatible_with(self, kind: &FieldKind) -> bool {
        match self {
            Self::PnCounter | Self::PCounter => matches!(
                kind,
                FieldKind::NillableInt | FieldKind::NillableFloat32 | FieldKind::NillableFloat64
            ),
            _ => true,
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoneCrdt => "none",
            Self::LwwRegister => "lww",
            Self::PnCounter => "pncounter",
            Self::PCounter => "pcounter",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_compatibility() {
        assert!(CType::PnCounter.is_compatible_with(&FieldKind::NillableInt));
        assert!(CType::PnCounter.is_compatible_with(&FieldKind::NillableFloat64));
        assert!(CType::PCounter.is_compatible_with(&FieldKind::NillableFloat32));

        assert!(!CType::PnCounter.is_compatible_with(&FieldKind::NillableString));
        assert!(!CType::PCounter.is_compatible_with(&FieldKind::NillableIntArray));
        assert!(!CType::PnCounter.is_compatible_with(&FieldKind::Object {
            name: "Author".to_string(),
            is_array: false
        }));
    }

    #[test]
    fn test_serialized_form_matches_directive_spelling() {
        assert_eq!(
            serde_json::to_value(CType::LwwRegister).unwrap(),
            serde_json::json!("lww")
        );
        assert_eq!(
            serde_json::to_value(CType::PnCounter).unwrap(),
            serde_json::json!("pncounter")
        );
        assert_eq!(
            serde_json::from_value::<CType>(serde_json::json!("pcounter")).unwrap(),
            CType::PCounter
        );
        assert_eq!(CType::NoneCrdt.to_string(), "none");
    }

    #[test]
    fn test_register_compatibility() {
        assert!(CType::LwwRegister.is_compatible_with(&FieldKind::NillableString));
        assert!(CType::LwwRegister.is_compatible_with(&FieldKind::NillableBoolArray));
        assert!(CType::NoneCrdt.is_compatible_with(&FieldKind::DocID));
    }
}
