//! Data types for documents, metadata, and collection references.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key-value metadata attached to a document.
pub type Metadata = HashMap<String, MetadataValue>;

/// A scalar metadata value: a string or a JSON number.
///
/// Numbers keep their exact JSON representation, so an integer sent as `3`
/// is never rewritten to `3.0` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(serde_json::Number),
}

impl MetadataValue {
    /// Build a numeric value from a float. Returns `None` for NaN and infinities.
    pub fn float(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self::Number)
    }

    /// Return the string value, if this is [`MetadataValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Identifies the collection a request targets.
///
/// Exactly one of `collection_id` and `collection_name` must be set; this is
/// checked by [`validate_collection_reference`](crate::validation::validate_collection_reference)
/// before any request leaves the client. Unset fields are omitted from the
/// request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl CollectionRef {
    /// Reference a collection by its id.
    pub fn id(id: impl Into<String>) -> Self {
        Self { collection_id: Some(id.into()), collection_name: None }
    }

    /// Reference a collection by its name.
    pub fn name(name: impl Into<String>) -> Self {
        Self { collection_id: None, collection_name: Some(name.into()) }
    }
}

/// A document to insert: an embedding plus optional metadata.
///
/// The server assigns the document id on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub embedding: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Document {
    pub fn new(embedding: Vec<f32>) -> Self {
        Self { embedding, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A change to an existing document, addressed by its server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocument {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateDocument {
    /// Replace the metadata of document `id`.
    pub fn metadata(id: impl Into<String>, metadata: Metadata) -> Self {
        Self { id: id.into(), embedding: None, metadata: Some(metadata) }
    }

    /// Also replace the embedding.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}
