//! The combined Starpoint client.
//!
//! [`Client`] bundles the [`Writer`], [`Reader`], and [`EmbeddingClient`]
//! behind one configured entry point, plus an optional external
//! [`EmbeddingProvider`] for building embeddings before insert.
//!
//! # Example
//!
//! ```rust,ignore
//! use starpoint::{Client, ClientConfig, CollectionRef, ColumnInsertRequest};
//!
//! let client = Client::with_config(
//!     "my-api-key",
//!     ClientConfig::builder().writer_host("http://localhost:3000").build()?,
//! )?;
//!
//! let response = client
//!     .column_insert(ColumnInsertRequest::new(
//!         CollectionRef::name("books"),
//!         vec![vec![0.1, 0.2, 0.3]],
//!         vec![metadata],
//!     ))
//!     .await?;
//! println!("inserted {} documents", response.documents.len());
//! ```

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{API_KEY_ENV, ClientConfig};
use crate::document::{CollectionRef, Metadata, MetadataValue};
use crate::embedding::{EmbeddingClient, EmbeddingModel};
use crate::error::{ApiResult, Result, StarpointError};
use crate::openai::{DEFAULT_OPENAI_MODEL, OpenAIEmbeddingProvider};
use crate::provider::{EmbeddingProvider, IndexedEmbedding};
use crate::reader::Reader;
use crate::request::{
    BuildAndInsertRequest, ColumnInsertRequest, ColumnUpdateRequest, CreateCollectionRequest,
    CreateCollectionResponse, DeleteCollectionRequest, DeleteCollectionResponse,
    DeleteDocumentsRequest, DocumentsResponse, EmbedItemsRequest, EmbedRequest, EmbedResponse,
    InferSchemaRequest, InferSchemaResponse, InsertDocumentsRequest, QueryRequest, QueryResponse,
    UpdateDocumentsRequest,
};
use crate::transport::{HttpTransport, Transport};
use crate::validation::validate_collection_reference;
use crate::writer::Writer;

/// What [`Client::build_and_insert_embeddings`] produced.
///
/// The provider's embeddings are always returned, whether or not the insert
/// succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildAndInsertOutcome {
    /// Embeddings from the provider, sorted by input index.
    pub embeddings: Vec<IndexedEmbedding>,
    /// Result of the writer insert. `None` when the provider returned no data.
    pub insert: Option<ApiResult<DocumentsResponse>>,
}

/// Client for all Starpoint services.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct Client {
    writer: Writer,
    reader: Reader,
    embedding: EmbeddingClient,
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl Client {
    /// Create a client against the default Starpoint hosts.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom hosts and options.
    ///
    /// # Errors
    ///
    /// Returns [`StarpointError::ConfigError`] if the API key is empty or any
    /// host is invalid. This is the only place the client fails eagerly.
    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(api_key)?);
        Self::with_transport(config, transport)
    }

    /// Create a client from `STARPOINT_API_KEY` and the optional host and
    /// OpenAI variables read by [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            StarpointError::ConfigError(format!("{API_KEY_ENV} environment variable not set"))
        })?;
        Self::with_config(&api_key, ClientConfig::from_env()?)
    }

    /// Create a client that sends every request through `transport`.
    ///
    /// The transport is responsible for authentication headers.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let provider = match config.openai_key.as_deref() {
            Some(key) => {
                Some(Arc::new(OpenAIEmbeddingProvider::new(key)?) as Arc<dyn EmbeddingProvider>)
            }
            None => None,
        };

        Ok(Self {
            writer: Writer::new(Arc::clone(&transport), &config.writer_host)?,
            reader: Reader::new(Arc::clone(&transport), &config.reader_host)?,
            embedding: EmbeddingClient::new(transport, &config.embedding_host)?,
            provider,
        })
    }

    /// Use `provider` for [`build_and_insert_embeddings`](Self::build_and_insert_embeddings),
    /// replacing any provider configured through `openai_key`.
    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn embedding(&self) -> &EmbeddingClient {
        &self.embedding
    }

    // ── Writer ─────────────────────────────────────────────────────

    pub async fn insert_documents(
        &self,
        request: &InsertDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        self.writer.insert_documents(request).await
    }

    pub async fn column_insert(&self, request: ColumnInsertRequest) -> ApiResult<DocumentsResponse> {
        self.writer.column_insert(request).await
    }

    pub async fn update_documents(
        &self,
        request: &UpdateDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        self.writer.update_documents(request).await
    }

    pub async fn column_update(&self, request: ColumnUpdateRequest) -> ApiResult<DocumentsResponse> {
        self.writer.column_update(request).await
    }

    pub async fn delete_documents(
        &self,
        request: &DeleteDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        self.writer.delete_documents(request).await
    }

    pub async fn create_collection(
        &self,
        request: &CreateCollectionRequest,
    ) -> ApiResult<CreateCollectionResponse> {
        self.writer.create_collection(request).await
    }

    pub async fn delete_collection(
        &self,
        request: &DeleteCollectionRequest,
    ) -> ApiResult<DeleteCollectionResponse> {
        self.writer.delete_collection(request).await
    }

    // ── Reader ─────────────────────────────────────────────────────

    pub async fn query_documents(&self, request: &QueryRequest) -> ApiResult<QueryResponse> {
        self.reader.query_documents(request).await
    }

    pub async fn infer_schema(
        &self,
        request: &InferSchemaRequest,
    ) -> ApiResult<InferSchemaResponse> {
        self.reader.infer_schema(request).await
    }

    // ── Embedding service ──────────────────────────────────────────

    pub async fn embed(&self, request: &EmbedRequest) -> ApiResult<EmbedResponse> {
        self.embedding.embed(request).await
    }

    pub async fn embed_items(&self, request: &EmbedItemsRequest) -> ApiResult<EmbedResponse> {
        self.embedding.embed_items(request).await
    }

    pub async fn embed_and_join_metadata(
        &self,
        texts: Vec<String>,
        metadata: Vec<Metadata>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        self.embedding.embed_and_join_metadata(texts, metadata, model).await
    }

    // ── External embeddings ────────────────────────────────────────

    /// Embed `request.input` with the configured [`EmbeddingProvider`] and
    /// insert the results as documents.
    ///
    /// Without explicit metadata, each input text `t` is stored with metadata
    /// `{"input": t}`. Embeddings are ordered by their reported index before
    /// being paired with metadata.
    ///
    /// Returns an error payload when the collection reference is invalid (the
    /// provider is not called), when no provider is configured, or when the
    /// provider fails. A failed insert is reported inside the outcome.
    pub async fn build_and_insert_embeddings(
        &self,
        request: BuildAndInsertRequest,
    ) -> ApiResult<BuildAndInsertOutcome> {
        validate_collection_reference(&request.collection)?;
        let provider = self.provider.as_ref().ok_or(StarpointError::EmbeddingProviderMissing)?;

        let mut embeddings = provider
            .create_embedding(&request.model, &request.input, request.user.as_deref())
            .await?;

        if embeddings.is_empty() {
            warn!(provider = provider.name(), "no embedding data found in the provider response");
            return Ok(BuildAndInsertOutcome { embeddings, insert: None });
        }

        let metadata = request.metadata.unwrap_or_else(|| {
            info!("no metadata provided; using the input text as document metadata");
            request
                .input
                .iter()
                .map(|text| {
                    Metadata::from([("input".to_string(), MetadataValue::from(text.as_str()))])
                })
                .collect()
        });

        embeddings.sort_by_key(|item| item.index);
        let vectors = embeddings.iter().map(|item| item.embedding.clone()).collect();

        let insert = self
            .writer
            .column_insert(ColumnInsertRequest::new(request.collection, vectors, metadata))
            .await;
        if let Err(e) = &insert {
            error!(error = %e, "failed to insert provider embeddings");
        }

        Ok(BuildAndInsertOutcome { embeddings, insert: Some(insert) })
    }

    /// [`build_and_insert_embeddings`](Self::build_and_insert_embeddings) with
    /// the `text-embedding-ada-002` model and input-derived metadata.
    pub async fn build_and_insert_default_embeddings(
        &self,
        collection: CollectionRef,
        input: Vec<String>,
    ) -> ApiResult<BuildAndInsertOutcome> {
        self.build_and_insert_embeddings(BuildAndInsertRequest::new(
            collection,
            DEFAULT_OPENAI_MODEL,
            input,
        ))
        .await
    }

    /// Probe the writer, reader, and embedding hosts.
    ///
    /// Construction never touches the network; call this to verify the hosts
    /// and key before issuing requests.
    pub async fn check_health(&self) -> ApiResult<()> {
        self.writer.check_health().await?;
        self.reader.check_health().await?;
        self.embedding.check_health().await
    }
}
