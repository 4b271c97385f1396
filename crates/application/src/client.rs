//! The shared authenticated client.
//!
//! Every call the application makes goes through one `AuthenticatedClient`:
//! its interceptor chain runs first, then the transport sends the request.

use std::sync::Arc;

use serde_json::Value;
use tandem_domain::{HttpMethod, HttpResponse, OutgoingRequest};
use tracing::{debug, warn};

use crate::auth::{AuthorizationInterceptor, InterceptorOptions, RefreshProcedure, TokenStore};
use crate::interceptor::RequestInterceptor;
use crate::ports::HttpClient;
use crate::{ApplicationError, ApplicationResult};

/// HTTP client with an interceptor chain in front of a transport.
#[derive(Clone)]
pub struct AuthenticatedClient {
    transport: Arc<dyn HttpClient>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl AuthenticatedClient {
    /// Creates a client with no interceptors.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpClient>) -> Self {
        Self {
            transport,
            interceptors: Vec::new(),
        }
    }

    /// Creates the standard client: one authorization interceptor bound to
    /// the given store and refresh procedure.
    ///
    /// The store is passed in rather than looked up globally, so separate
    /// clients built from separate stores share no credentials.
    #[must_use]
    pub fn authenticated(
        transport: Arc<dyn HttpClient>,
        store: TokenStore,
        refresh: Arc<dyn RefreshProcedure>,
        options: InterceptorOptions,
    ) -> Self {
        Self::new(transport).with_interceptor(Arc::new(AuthorizationInterceptor::new(
            store, refresh, options,
        )))
    }

    /// Appends an interceptor to the chain.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Number of registered interceptors.
    #[must_use]
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Runs the interceptor chain and sends the request.
    ///
    /// Returns the response whatever its status.
    ///
    /// # Errors
    /// Returns the first interceptor error, or the transport error.
    pub async fn send(&self, mut request: OutgoingRequest) -> ApplicationResult<HttpResponse> {
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request).await?;
        }

        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(&request).await?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );
        Ok(response)
    }

    /// Sends the request and fails on non-2xx statuses.
    ///
    /// # Errors
    /// Returns `ApplicationError::Status` for non-success responses.
    pub async fn send_checked(&self, request: OutgoingRequest) -> ApplicationResult<HttpResponse> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.send(request).await?;
        if response.status.is_success() {
            return Ok(response);
        }

        warn!(%method, %path, status = response.status.as_u16(), "request rejected");
        Err(ApplicationError::Status {
            status: response.status.as_u16(),
            body: response.text(),
        })
    }

    /// `GET path`, decoding the JSON body.
    ///
    /// # Errors
    /// Returns transport, status or decode errors.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: impl Into<String>,
    ) -> ApplicationResult<T> {
        let response = self.send_checked(OutgoingRequest::get(path)).await?;
        response
            .json()
            .map_err(|e| ApplicationError::Decode(e.to_string()))
    }

    /// `DELETE path`.
    ///
    /// # Errors
    /// Returns transport or status errors.
    pub async fn delete(&self, path: impl Into<String>) -> ApplicationResult<HttpResponse> {
        self.send_checked(OutgoingRequest::delete(path)).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    /// Returns transport or status errors.
    pub async fn patch_json(
        &self,
        path: impl Into<String>,
        body: &Value,
    ) -> ApplicationResult<HttpResponse> {
        let request = OutgoingRequest::with_json(HttpMethod::Patch, path, body)?;
        self.send_checked(request).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    /// Returns transport or status errors.
    pub async fn post_json(
        &self,
        path: impl Into<String>,
        body: &Value,
    ) -> ApplicationResult<HttpResponse> {
        let request = OutgoingRequest::with_json(HttpMethod::Post, path, body)?;
        self.send_checked(request).await
    }
}
