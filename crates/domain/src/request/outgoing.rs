//! The request object handed through the interceptor chain.

use std::time::Duration;

use serde::Serialize;

use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// A request on its way to the backend.
///
/// `path` is relative to the client's base URL (e.g. `/api/projects/1`).
/// Interceptors may only touch `headers`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL.
    pub path: String,
    /// Request headers.
    pub headers: Headers,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Per-request timeout, overriding the client default.
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Creates a request with a JSON body.
    ///
    /// # Errors
    /// Returns `InvalidBody` if the body cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(
        method: HttpMethod,
        path: impl Into<String>,
        body: &T,
    ) -> DomainResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        let mut request = Self::new(method, path);
        request.headers.set("Content-Type", "application/json");
        request.body = Some(value);
        Ok(request)
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
