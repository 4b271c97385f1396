//! Credential types and authentication policies

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the header the access token is attached to.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Opaque access token attached to outgoing requests.
///
/// The client never inspects the token's structure. An empty string
/// means no token is held.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no token is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short preview safe for logs (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        preview(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.preview()).finish()
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque refresh token, only ever sent to the authentication endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Wraps a raw refresh token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&preview(&self.0)).finish()
    }
}

fn preview(token: &str) -> String {
    if token.len() > 12 {
        format!("{}...", token.get(..8).unwrap_or_default())
    } else {
        token.to_string()
    }
}

/// How the access token is rendered into the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// The raw token, no prefix. This is what the backend currently receives.
    #[default]
    Raw,
    /// `Bearer <token>`.
    Bearer,
}

impl AuthScheme {
    /// Formats the header value for the given token.
    #[must_use]
    pub fn header_value(self, token: &AccessToken) -> String {
        match self {
            Self::Raw => token.as_str().to_string(),
            Self::Bearer => format!("Bearer {}", token.as_str()),
        }
    }
}

/// What the request interceptor does when the token refresh fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshFailurePolicy {
    /// Log the failure and send the request with whatever token is stored.
    #[default]
    Proceed,
    /// Fail the request before it is sent.
    Abort,
}

/// Authentication errors.
///
/// `Clone` so a single refresh outcome can be handed to every caller
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The store holds no refresh token.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The authentication endpoint refused the refresh.
    #[error("token refresh rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status returned by the endpoint.
        status: u16,
        /// Response body or error description.
        message: String,
    },

    /// The authentication endpoint could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// The endpoint answered 2xx with a body we could not use.
    #[error("malformed token response: {message}")]
    MalformedResponse {
        /// Error description.
        message: String,
    },
}
