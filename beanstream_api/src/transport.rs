//! Network execution of built requests.

use std::time::Duration;

use async_trait::async_trait;

use crate::{errors::TransportError, request::ApiRequest, Error};

/// Default request timeout for the built-in transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request and returns the raw response.
///
/// Implementations must not retry. Any non-2xx status is still a successful
/// transport result; only failures to obtain a response are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with the default 30-second timeout.
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one configured with a proxy.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method().into(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send {} {}: {}", request.method(), request.url(), e);
            TransportError::from(e)
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        Ok(RawResponse { status, body })
    }
}
