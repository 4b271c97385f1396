//! HTTP transport port

use async_trait::async_trait;
use tandem_domain::{HttpResponse, OutgoingRequest};
use thiserror::Error;

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that was applied.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a fully prepared request.
///
/// Implementations resolve `request.path` against their base URL and
/// return the raw response whatever its status. Interceptors have
/// already run by the time `execute` is called.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    /// Returns `HttpClientError` when no response could be obtained.
    async fn execute(&self, request: &OutgoingRequest) -> Result<HttpResponse, HttpClientError>;
}
