//! Configuration for the Starpoint client.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StarpointError};

/// Default writer service host.
pub const WRITER_URL: &str = "https://writer.starpoint.ai";
/// Default reader service host.
pub const READER_URL: &str = "https://reader.starpoint.ai";
/// Default embedding service host.
pub const EMBEDDING_URL: &str = "https://embedding.starpoint.ai";

const NO_HOST_ERROR: &str = "No host value provided. A host must be provided.";

/// Environment variable holding the Starpoint API key.
pub const API_KEY_ENV: &str = "STARPOINT_API_KEY";
pub const WRITER_HOST_ENV: &str = "STARPOINT_WRITER_HOST";
pub const READER_HOST_ENV: &str = "STARPOINT_READER_HOST";
pub const EMBEDDING_HOST_ENV: &str = "STARPOINT_EMBEDDING_HOST";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// Validate a service host and strip trailing slashes.
///
/// The host must be an absolute `http` or `https` URL with a host part and
/// no whitespace or control characters anywhere.
///
/// # Errors
///
/// Returns [`StarpointError::ConfigError`] if the host is empty or malformed.
pub fn validate_host(host: &str) -> Result<String> {
    if host.is_empty() {
        return Err(StarpointError::ConfigError(NO_HOST_ERROR.to_string()));
    }

    // `Url::parse` strips surrounding whitespace and tabs/newlines, so check the raw input.
    let clean = !host.chars().any(|c| c.is_whitespace() || c.is_control());
    let valid = clean
        && Url::parse(host)
            .map(|url| {
                matches!(url.scheme(), "http" | "https")
                    && url.host_str().is_some_and(|h| !h.is_empty())
            })
            .unwrap_or(false);
    if !valid {
        return Err(StarpointError::ConfigError(format!(
            "Provided host {host} is not a valid url format."
        )));
    }

    Ok(host.trim_end_matches('/').to_string())
}

/// Hosts and credentials used to build a [`Client`](crate::Client).
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub writer_host: String,
    pub reader_host: String,
    pub embedding_host: String,
    /// Enables [`OpenAIEmbeddingProvider`](crate::openai::OpenAIEmbeddingProvider) when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            writer_host: WRITER_URL.into(),
            reader_host: READER_URL.into(),
            embedding_host: EMBEDDING_URL.into(),
            openai_key: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("writer_host", &self.writer_host)
            .field("reader_host", &self.reader_host)
            .field("embedding_host", &self.embedding_host)
            .field("openai_key", &self.openai_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for constructing a [`ClientConfig`].
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Read hosts and the OpenAI key from the environment.
    ///
    /// Unset variables fall back to the defaults. Hosts are validated.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(host) = std::env::var(WRITER_HOST_ENV) {
            builder = builder.writer_host(host);
        }
        if let Ok(host) = std::env::var(READER_HOST_ENV) {
            builder = builder.reader_host(host);
        }
        if let Ok(host) = std::env::var(EMBEDDING_HOST_ENV) {
            builder = builder.embedding_host(host);
        }
        if let Ok(key) = std::env::var(OPENAI_KEY_ENV) {
            builder = builder.openai_key(key);
        }
        builder.build()
    }

    /// Validate every host, returning a copy with trailing slashes stripped.
    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            writer_host: validate_host(&self.writer_host)?,
            reader_host: validate_host(&self.reader_host)?,
            embedding_host: validate_host(&self.embedding_host)?,
            openai_key: self.openai_key.clone(),
        })
    }
}

/// Builder for constructing a validated [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the writer service host.
    pub fn writer_host(mut self, host: impl Into<String>) -> Self {
        self.config.writer_host = host.into();
        self
    }

    /// Set the reader service host.
    pub fn reader_host(mut self, host: impl Into<String>) -> Self {
        self.config.reader_host = host.into();
        self
    }

    /// Set the embedding service host.
    pub fn embedding_host(mut self, host: impl Into<String>) -> Self {
        self.config.embedding_host = host.into();
        self
    }

    /// Set the OpenAI API key used for client-side embedding generation.
    pub fn openai_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai_key = Some(key.into());
        self
    }

    /// Build the [`ClientConfig`], validating every host.
    ///
    /// # Errors
    ///
    /// Returns [`StarpointError::ConfigError`] if a host is empty or is not a
    /// valid `http`/`https` URL.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validated()
    }
}
