//! Shared request dispatch for the service clients.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::validate_host;
use crate::error::{ApiResult, Result, StarpointError, normalize};
use crate::transport::{HttpRequest, Transport};

/// Body returned by a healthy service root.
pub(crate) const HEALTH_CHECK_MESSAGE: &str = "hello.";

/// A transport bound to one validated service host.
#[derive(Clone)]
pub(crate) struct Endpoint {
    transport: Arc<dyn Transport>,
    host: String,
    service: &'static str,
}

impl Endpoint {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        host: &str,
        service: &'static str,
    ) -> Result<Self> {
        Ok(Self { transport, host: validate_host(host)?, service })
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    /// `GET` the host root. Healthy hosts answer with [`HEALTH_CHECK_MESSAGE`].
    ///
    /// Any other 2xx body only logs a warning.
    pub(crate) async fn check_health(&self) -> ApiResult<()> {
        let text = self
            .transport
            .get_text(&self.host)
            .await
            .map_err(|e| normalize(&StarpointError::from(e)))?;
        if text != HEALTH_CHECK_MESSAGE {
            warn!(
                service = self.service,
                host = %self.host,
                response = %text,
                "host may be unhealthy and unable to serve requests"
            );
        }
        Ok(())
    }

    /// Send `body` to `path` and decode the response, normalizing every failure.
    pub(crate) async fn call<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.try_call(method, path, body).await.map_err(|e| normalize(&e))
    }

    async fn try_call<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        debug!(service = self.service, %method, path, "dispatching request");

        let url = format!("{}{}", self.host, path);
        let response = self.transport.send(HttpRequest { method, url, body }).await?;

        // Empty 2xx bodies decode like `{}` so lenient responses fall back to defaults.
        let response = match response {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        Ok(serde_json::from_value(response)?)
    }
}
