//! Request interceptor hook.

use async_trait::async_trait;
use tandem_domain::OutgoingRequest;

use crate::ApplicationResult;

/// Cross-cutting hook run on every request before it is sent.
///
/// Interceptors run in registration order. An error stops the chain and
/// the request is never sent.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Inspects or mutates the request.
    ///
    /// # Errors
    /// Returns an error to cancel the request.
    async fn intercept(&self, request: &mut OutgoingRequest) -> ApplicationResult<()>;
}
