//! Access-control policy descriptors.

use serde::{Deserialize, Serialize};

/// Links a collection to an access-control policy resource.
///
/// The values are parsed from the `@policy` directive but are not validated
/// here; the access-control layer owns their semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDescription {
    pub id: String,
    pub resource_name: String,
}
