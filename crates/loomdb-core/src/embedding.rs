//! Vector-embedding descriptors.

use serde::{Deserialize, Serialize};

/// Configures the generation of an embedding vector for a field.
///
/// Parsed from the `@embedding` directive. Beyond literal-type checks the
/// values are opaque to the schema compiler; the embedding pipeline owns
/// their semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorEmbeddingDescription {
    /// The field the vector is stored in.
    pub field_name: String,
    /// Embedding provider, e.g. `ollama` or `openai`.
    pub provider: String,
    /// Model name, e.g. `nomic-embed-text`.
    pub model: String,
    /// Provider API URL.
    pub url: String,
    /// Fields whose values are fed to the model.
    pub fields: Vec<String>,
    /// Optional template combining the source fields into the model input.
    pub template: String,
}
