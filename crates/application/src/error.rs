//! Application error types

use tandem_domain::{AuthError, DomainError};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Obtaining or attaching credentials failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The transport failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApplicationError {
    /// Returns true if the backend rejected the credentials (401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
