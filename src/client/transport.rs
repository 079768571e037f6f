//! HTTP transport for the `/backends` endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::model::BackendKey;

/// Header carrying a per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Raw reply from the balancer. Classification happens in the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    /// A 200 reply carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Only 200 counts as success; other 2xx codes do not.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Failures below HTTP: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Build(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            TransportError::Build(e.to_string())
        } else if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

/// Operations the console needs from the balancer.
pub trait BackendApi: Clone + Send + Sync + 'static {
    /// `GET /backends`
    fn list_backends(&self) -> impl Future<Output = Result<ApiReply, TransportError>> + Send;

    /// `PUT /backends` with `{host, port}`
    fn add_backend(&self, key: &BackendKey) -> impl Future<Output = Result<ApiReply, TransportError>> + Send;

    /// `DELETE /backends` with `{host, port}`
    fn remove_backend(&self, key: &BackendKey) -> impl Future<Output = Result<ApiReply, TransportError>> + Send;
}

/// reqwest-backed implementation.
#[derive(Debug, Clone)]
pub struct HttpBackendApi {
    client: Client,
    endpoint: Url,
}

impl HttpBackendApi {
    /// Build a client for `{base_url}/backends` with a per-request timeout.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = backends_endpoint(base_url)?;

        tracing::debug!(endpoint = %endpoint, timeout_ms = timeout.as_millis() as u64, "Backend API client ready");

        Ok(Self { client, endpoint })
    }

    /// The resolved `/backends` URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiReply, TransportError> {
        let request_id = Uuid::new_v4().to_string();
        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(request_id = %request_id, error = %e, "Request failed");
                TransportError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::trace!(request_id = %request_id, status, bytes = body.len(), "Reply received");

        Ok(ApiReply { status, body })
    }
}

impl BackendApi for HttpBackendApi {
    fn list_backends(&self) -> impl Future<Output = Result<ApiReply, TransportError>> + Send {
        self.send(self.client.get(self.endpoint.clone()))
    }

    fn add_backend(&self, key: &BackendKey) -> impl Future<Output = Result<ApiReply, TransportError>> + Send {
        self.send(self.client.put(self.endpoint.clone()).json(key))
    }

    fn remove_backend(&self, key: &BackendKey) -> impl Future<Output = Result<ApiReply, TransportError>> + Send {
        self.send(self.client.delete(self.endpoint.clone()).json(key))
    }
}

/// Append `backends` to the base URL path, keeping any existing prefix.
pub fn backends_endpoint(base_url: &Url) -> Result<Url, TransportError> {
    let mut endpoint = base_url.clone();
    endpoint
        .path_segments_mut()
        .map_err(|_| TransportError::Build(format!("'{}' cannot be used as a base URL", base_url)))?
        .pop_if_empty()
        .push("backends");
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_bare_host() {
        let base = Url::parse("http://localhost:8081").unwrap();
        assert_eq!(backends_endpoint(&base).unwrap().as_str(), "http://localhost:8081/backends");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let base = Url::parse("http://lb.internal:9000/admin/").unwrap();
        assert_eq!(
            backends_endpoint(&base).unwrap().as_str(),
            "http://lb.internal:9000/admin/backends"
        );
    }

    #[test]
    fn test_endpoint_rejects_opaque_urls() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(backends_endpoint(&base), Err(TransportError::Build(_))));
    }
}
