use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

use crate::errors::TransportError;

/// Outbound request to the relay
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Response handle returned by a transport.
///
/// The body is released when the handle is dropped, whether or not it was read.
#[async_trait]
pub trait RelayResponse: Send {
    fn status(&self) -> StatusCode;

    /// Read the remaining response body to completion.
    async fn read_body(&mut self) -> Result<Vec<u8>, TransportError>;
}

/// Trait for executing relay requests
///
/// `NtfyClient` depends on this instead of a concrete HTTP client so that
/// requests can be recorded and responses scripted.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: RelayRequest,
    ) -> Result<Box<dyn RelayResponse>, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Build a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: RelayRequest,
    ) -> Result<Box<dyn RelayResponse>, TransportError> {
        let response = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Box::new(ReqwestResponse { inner: response }))
    }
}

struct ReqwestResponse {
    inner: reqwest::Response,
}

#[async_trait]
impl RelayResponse for ReqwestResponse {
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    async fn read_body(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();
        while let Some(chunk) = self
            .inner
            .chunk()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
        {
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
