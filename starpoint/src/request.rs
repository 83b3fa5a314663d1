//! Request and response bodies for the Starpoint services.
//!
//! Request types serialize to exactly the JSON the services expect. Response
//! types are lenient: missing or mistyped fields fall back to defaults, and
//! unknown fields are kept in `extra`.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::document::{CollectionRef, Document, Metadata, UpdateDocument};
use crate::embedding::EmbeddingModel;

// ── Writer requests ────────────────────────────────────────────────

/// Body of `POST /api/v1/documents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertDocumentsRequest {
    #[serde(flatten)]
    pub collection: CollectionRef,
    pub documents: Vec<Document>,
}

impl InsertDocumentsRequest {
    pub fn new(collection: CollectionRef, documents: Vec<Document>) -> Self {
        Self { collection, documents }
    }
}

/// An insert expressed as parallel columns of embeddings and metadata.
///
/// Row `i` pairs `embeddings[i]` with `metadata[i]`. If the columns differ in
/// length the extra entries of the longer one are dropped; see
/// [`transpose`](crate::transpose::transpose).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnInsertRequest {
    pub collection: CollectionRef,
    pub embeddings: Vec<Vec<f32>>,
    pub metadata: Vec<Metadata>,
}

impl ColumnInsertRequest {
    pub fn new(
        collection: CollectionRef,
        embeddings: Vec<Vec<f32>>,
        metadata: Vec<Metadata>,
    ) -> Self {
        Self { collection, embeddings, metadata }
    }
}

/// Body of `PATCH /api/v1/documents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentsRequest {
    #[serde(flatten)]
    pub collection: CollectionRef,
    pub documents: Vec<UpdateDocument>,
}

impl UpdateDocumentsRequest {
    pub fn new(collection: CollectionRef, documents: Vec<UpdateDocument>) -> Self {
        Self { collection, documents }
    }
}

/// An update expressed as parallel columns of ids, embeddings, and metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnUpdateRequest {
    pub collection: CollectionRef,
    pub ids: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadata: Vec<Metadata>,
}

/// Body of `DELETE /api/v1/documents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDocumentsRequest {
    #[serde(flatten)]
    pub collection: CollectionRef,
    /// Ids of the documents to remove. Sent as `documents`.
    #[serde(rename = "documents")]
    pub ids: Vec<String>,
}

impl DeleteDocumentsRequest {
    pub fn new(collection: CollectionRef, ids: Vec<String>) -> Self {
        Self { collection, ids }
    }
}

/// Body of `POST /api/v1/collections`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub dimensionality: Option<i64>,
}

impl CreateCollectionRequest {
    pub fn new(name: impl Into<String>, dimensionality: i64) -> Self {
        Self { name: name.into(), dimensionality: Some(dimensionality) }
    }
}

/// Body of `DELETE /api/v1/collections`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCollectionRequest {
    pub collection_id: String,
}

impl DeleteCollectionRequest {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self { collection_id: collection_id.into() }
    }
}

// ── Reader requests ────────────────────────────────────────────────

/// Body of `POST /api/v1/query`.
///
/// A query can be SQL against the collection, a similarity search by
/// `query_embedding`, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(flatten)]
    pub collection: CollectionRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_embedding: Option<Vec<f32>>,
    /// Values bound to placeholders in `sql`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl QueryRequest {
    pub fn new(collection: CollectionRef) -> Self {
        Self { collection, ..Default::default() }
    }

    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn query_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.query_embedding = Some(embedding);
        self
    }

    pub fn params(mut self, params: Vec<Value>) -> Self {
        self.params = Some(params);
        self
    }
}

/// Body of `POST /api/v1/infer_schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferSchemaRequest {
    #[serde(flatten)]
    pub collection: CollectionRef,
}

impl InferSchemaRequest {
    pub fn new(collection: CollectionRef) -> Self {
        Self { collection }
    }
}

// ── Embedding service requests ─────────────────────────────────────

/// Body of `POST /api/v1/embed` for plain texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedRequest {
    pub text: Vec<String>,
    pub model: String,
}

impl EmbedRequest {
    pub fn new(text: Vec<String>, model: EmbeddingModel) -> Self {
        Self { text, model: model.as_str().to_string() }
    }
}

/// One text to embed, with metadata joined back onto the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `POST /api/v1/embed` for texts paired with metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedItemsRequest {
    pub items: Vec<EmbedItem>,
    pub model: String,
}

impl EmbedItemsRequest {
    pub fn new(items: Vec<EmbedItem>, model: EmbeddingModel) -> Self {
        Self { items, model: model.as_str().to_string() }
    }
}

// ── Composite requests ─────────────────────────────────────────────

/// Input to [`Client::build_and_insert_embeddings`](crate::Client::build_and_insert_embeddings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildAndInsertRequest {
    pub collection: CollectionRef,
    /// Model name passed to the embedding provider.
    pub model: String,
    /// Texts to embed.
    pub input: Vec<String>,
    /// Metadata for each input. Defaults to `{"input": <text>}` per item.
    pub metadata: Option<Vec<Metadata>>,
    /// End-user identifier forwarded to the provider.
    pub user: Option<String>,
}

impl BuildAndInsertRequest {
    pub fn new(collection: CollectionRef, model: impl Into<String>, input: Vec<String>) -> Self {
        Self { collection, model: model.into(), input, metadata: None, user: None }
    }

    pub fn with_metadata(mut self, metadata: Vec<Metadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

// ── Responses ──────────────────────────────────────────────────────

/// Decode a response field, falling back to its default when the service
/// sends a value of an unexpected type. Never fails on well-formed JSON.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        warn!(error = %e, %value, "unexpected type in response field; using default");
        T::default()
    }))
}

/// Id of a document touched by a write.
///
/// Kept as raw JSON: deployed services have returned both string and numeric ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentId {
    pub id: Value,
    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the insert, update, and delete document endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsResponse {
    #[serde(deserialize_with = "lenient")]
    pub collection_id: String,
    #[serde(deserialize_with = "lenient")]
    pub documents: Vec<DocumentId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /api/v1/collections`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCollectionResponse {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub dimensionality: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `DELETE /api/v1/collections`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteCollectionResponse {
    #[serde(deserialize_with = "lenient")]
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /api/v1/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    #[serde(deserialize_with = "lenient")]
    pub collection_id: String,
    #[serde(deserialize_with = "lenient")]
    pub result_count: u64,
    #[serde(deserialize_with = "lenient")]
    pub sql: Option<String>,
    /// One JSON object per row. Document ids are under `__id`.
    #[serde(deserialize_with = "lenient")]
    pub results: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column types and nullability inferred from a collection's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferredSchema {
    #[serde(deserialize_with = "lenient")]
    pub types: HashMap<String, Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub nullability: HashMap<String, bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /api/v1/infer_schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferSchemaResponse {
    #[serde(deserialize_with = "lenient")]
    pub inferred_schema: InferredSchema,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One embedded text returned by the embedding service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedItem {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<Metadata>,
    #[serde(deserialize_with = "lenient")]
    pub embedding: Vec<f32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /api/v1/embed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedResponse {
    #[serde(deserialize_with = "lenient")]
    pub results: Vec<EmbeddedItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
