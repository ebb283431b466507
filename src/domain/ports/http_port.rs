//! Port definition for outgoing HTTP requests.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while performing a request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// Timeout that expired.
        timeout: Duration,
    },
    /// The remote host could not be reached.
    #[error("failed to connect: {0}")]
    Connect(String),
    /// Any other transport failure.
    #[error("request failed: {0}")]
    Request(String),
}

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL.
    pub url: String,
    /// Value for the `Referer` header, if any.
    pub referer: Option<String>,
    /// Upper bound for the whole exchange, body included.
    pub timeout: Duration,
}

impl FetchRequest {
    /// Creates a request with the default timeout and no referer.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referer: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `Referer` header.
    #[must_use]
    pub fn with_referer(mut self, referer: Option<impl Into<String>>) -> Self {
        self.referer = referer.map(Into::into);
        self
    }
}

/// Response status and fully read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body.
    pub body: Bytes,
}

impl FetchResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Port for fetching remote resources.
/// Implementations must enforce `FetchRequest::timeout`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpPort: Send + Sync {
    /// Performs a GET request and reads the whole body.
    async fn get(&self, request: FetchRequest) -> Result<FetchResponse, HttpError>;
}
