//! Request interceptor that refreshes and attaches the access token.

use std::sync::Arc;

use async_trait::async_trait;
use tandem_domain::{AUTHORIZATION_HEADER, AuthScheme, OutgoingRequest, RefreshFailurePolicy};
use tracing::{debug, warn};

use super::{RefreshProcedure, TokenStore};
use crate::ApplicationResult;
use crate::interceptor::RequestInterceptor;

/// How the interceptor renders the header and reacts to refresh failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorOptions {
    /// Header value format.
    pub scheme: AuthScheme,
    /// Behavior when the refresh fails.
    pub on_refresh_failure: RefreshFailurePolicy,
}

/// Runs before every request: refresh, read the store, attach.
///
/// 1. await the refresh procedure;
/// 2. read the current access token from the store;
/// 3. if it is non-empty, set `Authorization`;
/// 4. hand the request on.
pub struct AuthorizationInterceptor {
    store: TokenStore,
    refresh: Arc<dyn RefreshProcedure>,
    options: InterceptorOptions,
}

impl AuthorizationInterceptor {
    /// Creates an interceptor bound to a store and refresh procedure.
    #[must_use]
    pub fn new(
        store: TokenStore,
        refresh: Arc<dyn RefreshProcedure>,
        options: InterceptorOptions,
    ) -> Self {
        Self {
            store,
            refresh,
            options,
        }
    }
}

#[async_trait]
impl RequestInterceptor for AuthorizationInterceptor {
    async fn intercept(&self, request: &mut OutgoingRequest) -> ApplicationResult<()> {
        if let Err(error) = self.refresh.refresh().await {
            match self.options.on_refresh_failure {
                RefreshFailurePolicy::Proceed => {
                    warn!(%error, path = %request.path, "token refresh failed, sending with stored token");
                }
                RefreshFailurePolicy::Abort => {
                    warn!(%error, path = %request.path, "token refresh failed, aborting request");
                    return Err(error.into());
                }
            }
        }

        let token = self.store.access_token().await;
        if token.is_empty() {
            debug!(path = %request.path, "no access token, sending unauthenticated");
            return Ok(());
        }

        request
            .headers
            .set(AUTHORIZATION_HEADER, self.options.scheme.header_value(&token));
        debug!(path = %request.path, token = %token.preview(), "attached access token");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tandem_domain::{AccessToken, AuthError};

    use crate::ApplicationError;
    use crate::auth::CoalescingRefresh;
    use crate::client::AuthenticatedClient;
    use crate::client::testing::RecordingTransport;

    /// Records every call and writes a fixed token, or fails.
    struct ScriptedRefresh {
        store: TokenStore,
        next: Option<&'static str>,
        calls: AtomicUsize,
        log: Arc<Mutex<Vec<String>>>,
        delay: Duration,
    }

    impl ScriptedRefresh {
        fn writing(store: &TokenStore, token: &'static str) -> Self {
            Self {
                store: store.clone(),
                next: Some(token),
                calls: AtomicUsize::new(0),
                log: Arc::new(Mutex::new(Vec::new())),
                delay: Duration::ZERO,
            }
        }

        fn failing(store: &TokenStore) -> Self {
            Self {
                next: None,
                ..Self::writing(store, "")
            }
        }
    }

    #[async_trait]
    impl RefreshProcedure for ScriptedRefresh {
        async fn refresh(&self) -> Result<AccessToken, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let before = self.store.access_token().await;
            self.log
                .lock()
                .unwrap()
                .push(format!("refresh saw {}", before.as_str()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let Some(token) = self.next else {
                return Err(AuthError::Rejected {
                    status: 401,
                    message: "refresh token expired".to_string(),
                });
            };
            let token = AccessToken::new(token);
            self.store.set_access_token(token.clone()).await;
            Ok(token)
        }
    }

    /// Logs the `Authorization` header the chain has produced so far.
    struct HeaderLog(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl RequestInterceptor for HeaderLog {
        async fn intercept(&self, request: &mut OutgoingRequest) -> ApplicationResult<()> {
            let header = request.headers.get("Authorization").unwrap_or("<none>");
            self.0.lock().unwrap().push(format!("header {header}"));
            Ok(())
        }
    }

    fn interceptor(
        store: &TokenStore,
        refresh: Arc<dyn RefreshProcedure>,
        options: InterceptorOptions,
    ) -> AuthorizationInterceptor {
        AuthorizationInterceptor::new(store.clone(), refresh, options)
    }

    #[tokio::test]
    async fn test_empty_store_refreshes_then_attaches() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh::writing(&store, "abc123"));
        let interceptor = interceptor(&store, refresh.clone(), InterceptorOptions::default());

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        interceptor.intercept(&mut request).await.unwrap();

        assert_eq!(refresh.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.access_token().await.as_str(), "abc123");
        assert_eq!(request.headers.get("Authorization"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_refresh_completes_before_header_is_attached() {
        let transport = Arc::new(RecordingTransport::default());
        transport.respond("/api/projects/me/joined", 200, r#"{"results":{"content":[]}}"#);
        let store = TokenStore::with_tokens(AccessToken::new("stale"), None);
        let refresh = Arc::new(ScriptedRefresh::writing(&store, "fresh"));
        let log = refresh.log.clone();

        let client = AuthenticatedClient::authenticated(
            transport.clone(),
            store.clone(),
            refresh,
            InterceptorOptions::default(),
        )
        .with_interceptor(Arc::new(HeaderLog(log.clone())));

        client
            .send(OutgoingRequest::get("/api/projects/me/joined"))
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["refresh saw stale".to_string(), "header fresh".to_string()]
        );
        assert_eq!(
            transport.requests()[0].headers.get("Authorization"),
            Some("fresh")
        );
    }

    #[tokio::test]
    async fn test_header_uses_token_written_by_refresh() {
        let store = TokenStore::with_tokens(AccessToken::new("stale"), None);
        let refresh = Arc::new(ScriptedRefresh::writing(&store, "fresh"));
        let interceptor = interceptor(&store, refresh, InterceptorOptions::default());

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        interceptor.intercept(&mut request).await.unwrap();

        assert_eq!(request.headers.get("Authorization"), Some("fresh"));
    }

    #[tokio::test]
    async fn test_empty_token_leaves_header_unset() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh::writing(&store, ""));
        let interceptor = interceptor(&store, refresh, InterceptorOptions::default());

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        interceptor.intercept(&mut request).await.unwrap();

        assert!(!request.headers.contains("Authorization"));
    }

    #[tokio::test]
    async fn test_bearer_scheme() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh::writing(&store, "abc123"));
        let options = InterceptorOptions {
            scheme: AuthScheme::Bearer,
            ..InterceptorOptions::default()
        };
        let interceptor = interceptor(&store, refresh, options);

        let mut request = OutgoingRequest::delete("/api/projects/3");
        interceptor.intercept(&mut request).await.unwrap();

        assert_eq!(request.headers.get("Authorization"), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn test_refresh_failure_proceeds_with_stored_token() {
        let store = TokenStore::with_tokens(AccessToken::new("stored"), None);
        let refresh = Arc::new(ScriptedRefresh::failing(&store));
        let interceptor = interceptor(&store, refresh, InterceptorOptions::default());

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        interceptor.intercept(&mut request).await.unwrap();

        assert_eq!(request.headers.get("Authorization"), Some("stored"));
    }

    #[tokio::test]
    async fn test_refresh_failure_with_empty_store_sends_unauthenticated() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh::failing(&store));
        let interceptor = interceptor(&store, refresh, InterceptorOptions::default());

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        interceptor.intercept(&mut request).await.unwrap();

        assert!(!request.headers.contains("Authorization"));
    }

    #[tokio::test]
    async fn test_refresh_failure_aborts_when_configured() {
        let store = TokenStore::with_tokens(AccessToken::new("stored"), None);
        let refresh = Arc::new(ScriptedRefresh::failing(&store));
        let options = InterceptorOptions {
            on_refresh_failure: RefreshFailurePolicy::Abort,
            ..InterceptorOptions::default()
        };
        let interceptor = interceptor(&store, refresh, options);

        let mut request = OutgoingRequest::get("/api/projects/me/joined");
        let result = interceptor.intercept(&mut request).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Auth(AuthError::Rejected { status: 401, .. }))
        ));
        assert!(!request.headers.contains("Authorization"));
    }

    #[tokio::test]
    async fn test_concurrent_requests_each_refresh_without_coalescing() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh {
            delay: Duration::from_millis(20),
            ..ScriptedRefresh::writing(&store, "abc123")
        });
        let interceptor = interceptor(&store, refresh.clone(), InterceptorOptions::default());

        let mut requests: Vec<_> = (0..5)
            .map(|i| OutgoingRequest::get(format!("/api/projects/{i}")))
            .collect();
        futures::future::join_all(requests.iter_mut().map(|r| interceptor.intercept(r))).await;

        assert_eq!(refresh.calls.load(Ordering::SeqCst), 5);
        assert_eq!(refresh.log.lock().unwrap().len(), 5);
        assert!(requests
            .iter()
            .all(|r| r.headers.get("Authorization") == Some("abc123")));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_refresh_with_coalescing() {
        let store = TokenStore::new();
        let refresh = Arc::new(ScriptedRefresh {
            delay: Duration::from_millis(20),
            ..ScriptedRefresh::writing(&store, "abc123")
        });
        let coalescing = Arc::new(CoalescingRefresh::new(refresh.clone()));
        let interceptor = interceptor(&store, coalescing, InterceptorOptions::default());

        let mut requests: Vec<_> = (0..5)
            .map(|i| OutgoingRequest::get(format!("/api/projects/{i}")))
            .collect();
        futures::future::join_all(requests.iter_mut().map(|r| interceptor.intercept(r))).await;

        assert_eq!(refresh.calls.load(Ordering::SeqCst), 1);
        assert!(requests
            .iter()
            .all(|r| r.headers.get("Authorization") == Some("abc123")));
    }
}
