//! Client for the reader service: queries and schema inference.

use std::sync::Arc;

use reqwest::Method;

use crate::endpoint::Endpoint;
use crate::error::{ApiResult, Result};
use crate::request::{InferSchemaRequest, InferSchemaResponse, QueryRequest, QueryResponse};
use crate::transport::Transport;
use crate::validation::validate_collection_reference;

pub const QUERY_PATH: &str = "/api/v1/query";
pub const INFER_SCHEMA_PATH: &str = "/api/v1/infer_schema";

/// Client for the reader endpoints.
#[derive(Clone)]
pub struct Reader {
    endpoint: Endpoint,
}

impl Reader {
    pub fn new(transport: Arc<dyn Transport>, host: &str) -> Result<Self> {
        Ok(Self { endpoint: Endpoint::new(transport, host, "reader")? })
    }

    pub fn host(&self) -> &str {
        self.endpoint.host()
    }

    /// Query a collection by SQL, by similarity to `query_embedding`, or both.
    pub async fn query_documents(&self, request: &QueryRequest) -> ApiResult<QueryResponse> {
        validate_collection_reference(&request.collection)?;
        self.endpoint.call(Method::POST, QUERY_PATH, request).await
    }

    /// Infer column types and nullability from a collection's metadata.
    pub async fn infer_schema(
        &self,
        request: &InferSchemaRequest,
    ) -> ApiResult<InferSchemaResponse> {
        validate_collection_reference(&request.collection)?;
        self.endpoint.call(Method::POST, INFER_SCHEMA_PATH, request).await
    }

    /// Check that the service answers its health probe.
    pub async fn check_health(&self) -> ApiResult<()> {
        self.endpoint.check_health().await
    }
}
