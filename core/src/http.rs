//! HTTP transport boundary for the Mailman client.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and hands them to a [`Transport`], which owns base-URL joining,
//! credentials, and the actual I/O. Responses that carry an HTTP status come
//! back as `Ok(HttpResponse)` even for 4xx/5xx — status interpretation
//! belongs to the client, which sometimes needs a follow-up request to
//! decide what a 404 actually meant.

use thiserror::Error;

/// HTTP method for a request. Only the verbs the Mailman API client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A request against the Mailman REST API, described as plain data.
///
/// `path` is relative to the transport's base URL. All request parameters
/// travel as query parameters; the service accepts its POST parameters in
/// that form.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// A response as seen by the client: status code plus raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Connection-level transport failure.
///
/// Anything that produced an HTTP status, even a 5xx, is an
/// [`HttpResponse`] instead.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Executes requests against the remote service.
///
/// Implementations apply the configured base URL and credentials per
/// request and report connection-level failures only; every response with
/// a status code is returned as data.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
