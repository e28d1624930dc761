//! HTTP client trait abstraction.
//!
//! The poller only ever needs two verbs against the upstream file server:
//! GET for the directory listing and HEAD for each thumbnail. Keeping them
//! behind a trait lets the fetcher and checker run against a mock in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
///
/// Keys are stored lowercase by the production adapter; use
/// [`Response::header`] for case-insensitive lookup.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body (empty for HEAD)
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Add a single header, builder style.
    pub fn header_pair(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client errors.
///
/// These cover failures where no response was received at all. A response
/// with a non-2xx status is still an `Ok(Response)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Response body could not be read
    Body(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Body(msg) => write!(f, "Failed to read body: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client
/// ([`crate::adapters::ReqwestHttpClient`]) and a recording mock
/// ([`crate::adapters::MockHttpClient`]).
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and read the whole body.
    async fn get(&self, url: &str) -> Result<Response, HttpError>;

    /// Perform a HEAD request. The returned body is always empty.
    async fn head(&self, url: &str) -> Result<Response, HttpError>;
}
