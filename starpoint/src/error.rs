//! Error types for the `starpoint` crate.
//!
//! Three layers of errors exist:
//!
//! - [`ValidationError`]: a request failed a client-side check. Always one of
//!   the fixed catalog messages the Starpoint services also use.
//! - [`TransportError`]: the HTTP exchange itself failed (network, non-2xx,
//!   undecodable body).
//! - [`StarpointError`]: the crate-wide error, wrapping both plus
//!   configuration and embedding-provider failures.
//!
//! Endpoints never hand a [`StarpointError`] to the caller. They run it through
//! [`normalize`] and return an [`ErrorPayload`] inside an [`ApiResult`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by request validation before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A document to insert has an empty embedding.
    #[error("Did not specify an embedding for a document in the request")]
    MissingEmbedding,

    /// Neither `collection_id` nor `collection_name` was set.
    #[error("Did not specify id or name identifier for collection in request")]
    MissingCollectionIdentifier,

    /// `collection_id` was set to an empty string.
    #[error("Id cannot be null for collection in request")]
    EmptyCollectionId,

    /// `collection_name` was set to an empty string.
    #[error("Name identifier cannot be null for collection in request")]
    EmptyCollectionName,

    /// Both `collection_id` and `collection_name` were set.
    #[error(
        "Request has too many identifiers. Either pass in collection_id or collection_name, not both"
    )]
    TooManyIdentifiers,

    /// The request carries no documents.
    #[error("Did not specify documents in request")]
    MissingDocuments,

    /// An update document has an empty id.
    #[error("Did not specify an id for a document in the request")]
    MissingDocumentId,

    /// An update document has no metadata, or empty metadata.
    #[error("Did not specify metadata for a document in the request")]
    MissingMetadata,

    /// A delete request lists no document ids.
    #[error("Did not specify document id(s) to delete in request")]
    MissingDeleteIds,

    /// A new collection has an empty name.
    #[error("Did not specify name of collection in request")]
    MissingCollectionName,

    /// A new collection has no dimensionality.
    #[error("Did not specify dimensionality of collection in request")]
    MissingDimensionality,

    /// A new collection's dimensionality is zero or negative.
    #[error("Dimensionality cannot be less than or equal to 0")]
    NonPositiveDimensionality,

    /// A collection delete has an empty `collection_id`.
    #[error("Did not specify collection_id in request")]
    MissingCollectionId,

    /// An embed request has no texts or items.
    #[error("Did not specify text(s) to embed in request")]
    MissingEmbedInput,

    /// The model is not one of the [`EmbeddingModel`](crate::EmbeddingModel)s.
    #[error("Embedding model '{0}' is not supported")]
    UnsupportedEmbeddingModel(String),
}

/// Errors produced by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The service answered with a non-2xx status.
    #[error("Request failed with status code {status} and the following message: {text}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The response body, when it parsed as JSON.
        body: Option<serde_json::Value>,
        /// The raw response body.
        text: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// A 2xx response whose body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Errors that can occur anywhere in the Starpoint client.
#[derive(Debug, Error)]
pub enum StarpointError {
    /// A request failed client-side validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The client configuration is invalid.
    #[error("{0}")]
    ConfigError(String),

    /// An error occurred during external embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The client was built without an embedding provider.
    #[error(
        "OpenAI instance has not been initialized. Please configure an openai_key or attach an embedding provider"
    )]
    EmbeddingProviderMissing,

    /// A request or response could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A convenience result type for fallible operations inside the crate.
pub type Result<T> = std::result::Result<T, StarpointError>;

/// The error half of every endpoint result.
///
/// Either a plain message, or the upstream service's JSON error body passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// A client-side or transport message.
    Message {
        /// Human readable description of the failure.
        error_message: String,
    },
    /// The body returned by the Starpoint service.
    Upstream(serde_json::Value),
}

impl ErrorPayload {
    /// Build a [`ErrorPayload::Message`].
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message { error_message: message.into() }
    }

    /// Return the error message, if this payload carries one.
    ///
    /// Upstream bodies are searched for a top-level `error_message` or
    /// `message` string.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Message { error_message } => Some(error_message),
            Self::Upstream(body) => body
                .get("error_message")
                .or_else(|| body.get("message"))
                .and_then(serde_json::Value::as_str),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message { error_message } => f.write_str(error_message),
            Self::Upstream(body) => write!(f, "{body}"),
        }
    }
}

impl std::error::Error for ErrorPayload {}

/// The result of every endpoint call: the parsed response body, or an
/// [`ErrorPayload`].
pub type ApiResult<T> = std::result::Result<T, ErrorPayload>;

/// Convert any crate error into the payload returned to endpoint callers.
///
/// A non-2xx response with a JSON body passes that body through. Everything
/// else is wrapped as `{"error_message": <display>}`.
pub fn normalize(error: &StarpointError) -> ErrorPayload {
    match error {
        StarpointError::Transport(TransportError::Status { body: Some(body), .. }) => {
            ErrorPayload::Upstream(body.clone())
        }
        other => ErrorPayload::message(other.to_string()),
    }
}

impl From<StarpointError> for ErrorPayload {
    fn from(error: StarpointError) -> Self {
        normalize(&error)
    }
}

impl From<ValidationError> for ErrorPayload {
    fn from(error: ValidationError) -> Self {
        ErrorPayload::message(error.to_string())
    }
}
