//! HTTP transport seam.
//!
//! Services never talk to `reqwest` directly. They hand a [`TransportRequest`] to an
//! [`HttpTransport`] and get back either a successful [`TransportResponse`] or a
//! [`TransportFailure`] describing what went wrong. The failure is what the error normalizer
//! consumes, so it carries the status, headers and body exactly as the wire delivered them.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// A request to be issued by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response with a success (2xx) status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// What is known about the body of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureBody {
    /// No usable response: a network fault or an error raised on the client side.
    /// Holds the fault's own description.
    ClientSide(String),
    /// The raw body of a non-success response.
    Server(String),
    /// Nothing is known about the body.
    Absent,
}

/// A failed HTTP call as reported by the transport layer.
#[derive(Debug, Clone)]
pub struct TransportFailure {
    /// Response status; `None` when no response was received.
    pub status: Option<u16>,
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: FailureBody,
}

impl TransportFailure {
    /// A failure where no response was received.
    pub fn client_side(description: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: String::new(),
            headers: HeaderMap::new(),
            body: FailureBody::ClientSide(description.into()),
        }
    }

    /// A non-success response from the server.
    pub fn server(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: FailureBody::Server(body.into()),
        }
    }

    /// Attaches the status of a response whose body could not be used.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16());
        self.status_text = status.canonical_reason().unwrap_or_default().to_string();
        self
    }
}

/// Something that can issue HTTP requests on behalf of the entity services.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request`. Only 2xx responses are returned as `Ok`.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with the request timeout from `cfg`.
    pub fn new(cfg: &ClientConfig) -> ClientResult<Self> {
        Self::with_timeout(cfg.request_timeout())
    }

    pub fn with_timeout(timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::HttpClientBuild)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::client_side(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| TransportFailure::client_side(e.to_string()).with_status(status))?;
            return Ok(TransportResponse {
                status,
                headers,
                body,
            });
        }

        match response.text().await {
            Ok(body) => Err(TransportFailure::server(status, headers, body)),
            Err(e) => {
                tracing::warn!("failed to read error response body: {}", e);
                let mut failure = TransportFailure::server(status, headers, String::new());
                failure.body = FailureBody::Absent;
                Err(failure)
            }
        }
    }
}
