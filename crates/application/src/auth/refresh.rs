//! Token refresh port and the in-flight coalescing wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tandem_domain::{AccessToken, AuthError};
use tokio::sync::Mutex;
use tracing::debug;

/// Obtains a fresh access token and writes it to the token store.
///
/// Implementations read whatever they need (usually the refresh token)
/// from the store they were built with. The store must be updated before
/// `refresh` returns `Ok`; on error it is left untouched.
#[async_trait]
pub trait RefreshProcedure: Send + Sync {
    /// Refreshes the access token.
    ///
    /// # Errors
    /// Returns `AuthError` if no new token could be obtained.
    async fn refresh(&self) -> Result<AccessToken, AuthError>;
}

type InFlight = Shared<BoxFuture<'static, Result<AccessToken, AuthError>>>;

/// Collapses concurrent refreshes into one call.
///
/// While a refresh is running every new caller awaits that same refresh
/// and receives its result. Once it settles the next caller starts a new
/// one. Without this wrapper N concurrent requests issue N refresh calls.
pub struct CoalescingRefresh {
    inner: Arc<dyn RefreshProcedure>,
    in_flight: Mutex<Option<InFlight>>,
}

impl CoalescingRefresh {
    /// Wraps a refresh procedure.
    #[must_use]
    pub fn new(inner: Arc<dyn RefreshProcedure>) -> Self {
        Self {
            inner,
            in_flight: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RefreshProcedure for CoalescingRefresh {
    async fn refresh(&self) -> Result<AccessToken, AuthError> {
        let refresh = {
            let mut slot = self.in_flight.lock().await;
            if let Some(existing) = slot.as_ref() {
                debug!("joining in-flight token refresh");
                existing.clone()
            } else {
                let inner = Arc::clone(&self.inner);
                let started = async move { inner.refresh().await }.boxed().shared();
                *slot = Some(started.clone());
                started
            }
        };

        let result = refresh.clone().await;

        let mut slot = self.in_flight.lock().await;
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&refresh)) {
            *slot = None;
        }
        result
    }
}
