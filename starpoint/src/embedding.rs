//! Client for the Starpoint embedding service.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::document::Metadata;
use crate::endpoint::Endpoint;
use crate::error::{ApiResult, Result, ValidationError};
use crate::request::{EmbedItem, EmbedItemsRequest, EmbedRequest, EmbedResponse};
use crate::transport::Transport;
use crate::validation::{validate_embed_input, validate_embedding_model};

pub const EMBED_PATH: &str = "/api/v1/embed";

/// Embedding models hosted by the Starpoint embedding service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbeddingModel {
    #[default]
    #[serde(rename = "MiniLm")]
    MiniLm,
}

impl EmbeddingModel {
    pub const ALL: &'static [EmbeddingModel] = &[EmbeddingModel::MiniLm];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingModel::MiniLm => "MiniLm",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingModel {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedEmbeddingModel(s.to_string()))
    }
}

/// Client for the embedding endpoints.
#[derive(Clone)]
pub struct EmbeddingClient {
    endpoint: Endpoint,
}

impl EmbeddingClient {
    pub fn new(transport: Arc<dyn Transport>, host: &str) -> Result<Self> {
        Ok(Self { endpoint: Endpoint::new(transport, host, "embedding")? })
    }

    pub fn host(&self) -> &str {
        self.endpoint.host()
    }

    /// Embed plain texts with a Starpoint-hosted model.
    pub async fn embed(&self, request: &EmbedRequest) -> ApiResult<EmbedResponse> {
        validate_embed_input(&request.text)?;
        validate_embedding_model(&request.model)?;
        self.endpoint.call(Method::POST, EMBED_PATH, request).await
    }

    /// Embed texts that carry metadata; the metadata is joined onto each result.
    pub async fn embed_items(&self, request: &EmbedItemsRequest) -> ApiResult<EmbedResponse> {
        validate_embed_input(&request.items)?;
        validate_embedding_model(&request.model)?;
        self.endpoint.call(Method::POST, EMBED_PATH, request).await
    }

    /// Pair `texts[i]` with `metadata[i]` and embed them as items.
    ///
    /// Like column inserts, the shorter list wins.
    pub async fn embed_and_join_metadata(
        &self,
        texts: Vec<String>,
        metadata: Vec<Metadata>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        let items = texts
            .into_iter()
            .zip(metadata)
            .map(|(text, metadata)| EmbedItem { text, metadata: Some(metadata) })
            .collect();
        self.embed_items(&EmbedItemsRequest { items, model: model.as_str().to_string() }).await
    }

    /// Check that the service answers its health probe.
    pub async fn check_health(&self) -> ApiResult<()> {
        self.endpoint.check_health().await
    }
}
