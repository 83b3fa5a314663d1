//! OpenAI embedding provider using the OpenAI embeddings API.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::OPENAI_KEY_ENV;
use crate::error::{Result, StarpointError};
use crate::provider::{EmbeddingProvider, IndexedEmbedding};

/// The default OpenAI API base URL.
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// The model used by [`Client::build_and_insert_default_embeddings`](crate::Client::build_and_insert_default_embeddings).
pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-ada-002";

const PROVIDER: &str = "OpenAI";

/// An [`EmbeddingProvider`] backed by the OpenAI embeddings API.
///
/// Uses `reqwest` to call the `/v1/embeddings` endpoint directly.
///
/// # Example
///
/// ```rust,ignore
/// use starpoint::openai::OpenAIEmbeddingProvider;
///
/// let provider = OpenAIEmbeddingProvider::new("sk-...")?;
/// let data = provider
///     .create_embedding("text-embedding-ada-002", &["hello world".into()], None)
///     .await?;
/// ```
pub struct OpenAIEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIEmbeddingProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Self::config_error("API key must not be empty"));
        }

        Ok(Self { client: reqwest::Client::new(), api_key, base_url: OPENAI_API_BASE.into() })
    }

    /// Create a new provider using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(OPENAI_KEY_ENV).map_err(|_| {
            Self::config_error(&format!("{OPENAI_KEY_ENV} environment variable not set"))
        })?;
        Self::new(api_key)
    }

    /// Create a new provider reading the API key from a file.
    ///
    /// Surrounding whitespace in the file is ignored.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StarpointError::ConfigError(
                "The provided filepath for the API key is not a valid file.".into(),
            ));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StarpointError::ConfigError(format!(
                "failed to read API key file {}: {e}",
                path.display()
            ))
        })?;
        Self::new(contents.trim())
    }

    /// Point the provider at an OpenAI-compatible API (or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn config_error(message: &str) -> StarpointError {
        StarpointError::EmbeddingError { provider: PROVIDER.into(), message: message.into() }
    }
}

// ── OpenAI API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<IndexedEmbedding>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn create_embedding(
        &self,
        model: &str,
        input: &[String],
        user: Option<&str>,
    ) -> Result<Vec<IndexedEmbedding>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = PROVIDER, batch_size = input.len(), model, "embedding batch");

        let request_body = EmbeddingRequest { model, input, user };
        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                StarpointError::EmbeddingError {
                    provider: PROVIDER.into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(StarpointError::EmbeddingError {
                provider: PROVIDER.into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            StarpointError::EmbeddingError {
                provider: PROVIDER.into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embedding_response.data)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
