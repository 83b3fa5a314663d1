//! Client for the writer service: documents and collections.

use std::sync::Arc;

use reqwest::Method;

use crate::endpoint::Endpoint;
use crate::error::{ApiResult, Result};
use crate::request::{
    ColumnInsertRequest, ColumnUpdateRequest, CreateCollectionRequest, CreateCollectionResponse,
    DeleteCollectionRequest, DeleteCollectionResponse, DeleteDocumentsRequest, DocumentsResponse,
    InsertDocumentsRequest, UpdateDocumentsRequest,
};
use crate::transport::Transport;
use crate::transpose::{transpose, transpose_updates};
use crate::validation::{
    validate_collection_reference, validate_create_collection, validate_delete_collection,
    validate_delete_ids, validate_documents_for_insert, validate_documents_for_update,
};

pub const DOCUMENTS_PATH: &str = "/api/v1/documents";
pub const COLLECTIONS_PATH: &str = "/api/v1/collections";

/// Client for the writer endpoints.
///
/// Most callers want [`Client`](crate::Client), which bundles the writer with
/// the reader and embedding clients.
#[derive(Clone)]
pub struct Writer {
    endpoint: Endpoint,
}

impl Writer {
    /// Bind a writer to `host`. The host is validated and normalized.
    pub fn new(transport: Arc<dyn Transport>, host: &str) -> Result<Self> {
        Ok(Self { endpoint: Endpoint::new(transport, host, "writer")? })
    }

    pub fn host(&self) -> &str {
        self.endpoint.host()
    }

    /// Insert documents into an existing collection.
    pub async fn insert_documents(
        &self,
        request: &InsertDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        validate_collection_reference(&request.collection)?;
        validate_documents_for_insert(&request.documents)?;
        self.endpoint.call(Method::POST, DOCUMENTS_PATH, request).await
    }

    /// Insert documents given as parallel embedding and metadata columns.
    ///
    /// The columns are transposed into documents first, so a length mismatch
    /// drops the unmatched tail rather than failing.
    pub async fn column_insert(&self, request: ColumnInsertRequest) -> ApiResult<DocumentsResponse> {
        let documents = transpose(request.embeddings, request.metadata);
        self.insert_documents(&InsertDocumentsRequest::new(request.collection, documents)).await
    }

    /// Update the metadata (and optionally embeddings) of existing documents.
    pub async fn update_documents(
        &self,
        request: &UpdateDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        validate_collection_reference(&request.collection)?;
        validate_documents_for_update(&request.documents)?;
        self.endpoint.call(Method::PATCH, DOCUMENTS_PATH, request).await
    }

    /// Update documents given as parallel id, embedding, and metadata columns.
    pub async fn column_update(&self, request: ColumnUpdateRequest) -> ApiResult<DocumentsResponse> {
        let documents = transpose_updates(request.ids, request.embeddings, request.metadata);
        self.update_documents(&UpdateDocumentsRequest::new(request.collection, documents)).await
    }

    /// Remove documents by id.
    pub async fn delete_documents(
        &self,
        request: &DeleteDocumentsRequest,
    ) -> ApiResult<DocumentsResponse> {
        validate_collection_reference(&request.collection)?;
        validate_delete_ids(&request.ids)?;
        self.endpoint.call(Method::DELETE, DOCUMENTS_PATH, request).await
    }

    /// Create a collection with a fixed embedding dimensionality.
    pub async fn create_collection(
        &self,
        request: &CreateCollectionRequest,
    ) -> ApiResult<CreateCollectionResponse> {
        validate_create_collection(request)?;
        self.endpoint.call(Method::POST, COLLECTIONS_PATH, request).await
    }

    pub async fn delete_collection(
        &self,
        request: &DeleteCollectionRequest,
    ) -> ApiResult<DeleteCollectionResponse> {
        validate_delete_collection(request)?;
        self.endpoint.call(Method::DELETE, COLLECTIONS_PATH, request).await
    }

    /// Check that the service answers its health probe.
    pub async fn check_health(&self) -> ApiResult<()> {
        self.endpoint.check_health().await
    }
}
