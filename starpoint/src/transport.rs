//! HTTP transport abstraction.
//!
//! Endpoints describe a call as an [`HttpRequest`] and hand it to a
//! [`Transport`]. [`HttpTransport`] is the production implementation on top of
//! `reqwest`; tests and alternative HTTP stacks can supply their own.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Result, StarpointError, TransportError};

/// Header carrying the Starpoint API key on every call.
pub const API_HEADER_KEY: &str = "x-starpoint-key";

/// One outbound JSON request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL: validated host plus endpoint path.
    pub url: String,
    /// JSON body. `DELETE` requests carry a body too.
    pub body: Value,
}

/// Sends requests to the Starpoint services.
///
/// Implementations attach authentication, perform exactly one exchange per
/// call, and never retry.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use starpoint::{Client, ClientConfig, HttpTransport};
///
/// let transport = HttpTransport::with_builder(
///     reqwest::Client::builder().timeout(std::time::Duration::from_secs(10)),
///     "my-api-key",
/// )?;
/// let client = Client::with_transport(ClientConfig::default(), Arc::new(transport))?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON request and return the decoded JSON response body.
    ///
    /// A non-2xx status is returned as [`TransportError::Status`]. An empty
    /// 2xx body decodes to [`Value::Null`].
    async fn send(&self, request: HttpRequest) -> std::result::Result<Value, TransportError>;

    /// `GET` a URL and return the body as text. Used for host health checks.
    async fn get_text(&self, url: &str) -> std::result::Result<String, TransportError>;
}

/// A [`Transport`] backed by a `reqwest::Client`.
///
/// The API key is installed as a default header, so it is sent on every
/// request, including health checks.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_builder(reqwest::Client::builder(), api_key)
    }

    /// Create a transport from a caller-configured builder (timeouts, proxies, TLS).
    pub fn with_builder(builder: reqwest::ClientBuilder, api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(StarpointError::ConfigError(
                "No API key provided. An API key must be provided.".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key).map_err(|e| {
            StarpointError::ConfigError(format!("API key is not a valid header value: {e}"))
        })?;
        headers.insert(API_HEADER_KEY, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = builder.default_headers(headers).build().map_err(|e| {
            StarpointError::ConfigError(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }

    fn request_failed(url: &str, e: reqwest::Error) -> TransportError {
        error!(%url, error = %e, "request failed");
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<Value, TransportError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .client
            .request(request.method, &request.url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| Self::request_failed(&request.url, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Self::request_failed(&request.url, e))?;

        if !status.is_success() {
            error!(
                url = %request.url,
                %status,
                body = %text,
                "request failed with non-success status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
                text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            error!(url = %request.url, error = %e, "failed to parse response");
            TransportError::Decode(e.to_string())
        })
    }

    async fn get_text(&self, url: &str) -> std::result::Result<String, TransportError> {
        let response =
            self.client.get(url).send().await.map_err(|e| Self::request_failed(url, e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| Self::request_failed(url, e))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
                text,
            });
        }
        Ok(text)
    }
}
