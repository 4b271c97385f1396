//! Refresh procedure that calls the backend's token refresh endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tandem_application::{RefreshProcedure, TokenStore};
use tandem_domain::{AccessToken, AuthError, RefreshToken};
use tracing::{debug, info, warn};

/// Request body sent to the refresh endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Successful refresh response. Both camelCase and snake_case are accepted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    #[serde(alias = "access_token")]
    access_token: String,
    #[serde(default, alias = "refresh_token")]
    refresh_token: Option<String>,
}

/// Exchanges the stored refresh token for a new access token.
///
/// Uses its own plain reqwest client: the refresh call must not pass
/// through the authorization interceptor that triggered it.
pub struct HttpRefreshProcedure {
    http_client: Client,
    refresh_url: Url,
    store: TokenStore,
}

impl HttpRefreshProcedure {
    /// Creates a refresh procedure posting to `refresh_url`.
    ///
    /// `timeout` bounds the whole exchange, body included. Callers that
    /// share an in-flight refresh all fail once it elapses.
    #[must_use]
    pub fn new(refresh_url: Url, store: TokenStore, timeout: Duration) -> Self {
        Self::with_client(
            Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            refresh_url,
            store,
        )
    }

    /// Creates a refresh procedure with a custom reqwest client.
    #[must_use]
    pub const fn with_client(http_client: Client, refresh_url: Url, store: TokenStore) -> Self {
        Self {
            http_client,
            refresh_url,
            store,
        }
    }
}

#[async_trait]
impl RefreshProcedure for HttpRefreshProcedure {
    async fn refresh(&self) -> Result<AccessToken, AuthError> {
        let Some(refresh_token) = self.store.refresh_token().await else {
            debug!("no refresh token stored, skipping refresh");
            return Err(AuthError::MissingRefreshToken);
        };

        let response = self
            .http_client
            .post(self.refresh_url.clone())
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            })
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "refresh endpoint rejected the refresh token");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RefreshResponse = response.json().await.map_err(|e: reqwest::Error| {
            if e.is_timeout() {
                network_error(&e)
            } else {
                AuthError::MalformedResponse {
                    message: e.to_string(),
                }
            }
        })?;

        if body.access_token.is_empty() {
            return Err(AuthError::MalformedResponse {
                message: "empty access token".to_string(),
            });
        }

        let token = AccessToken::new(body.access_token);
        self.store.set_access_token(token.clone()).await;
        if let Some(rotated) = body.refresh_token {
            self.store.set_refresh_token(RefreshToken::new(rotated)).await;
        }

        info!(token = %token.preview(), "access token refreshed");
        Ok(token)
    }
}

fn network_error(error: &reqwest::Error) -> AuthError {
    let message = if error.is_timeout() {
        format!("refresh timed out: {error}")
    } else {
        error.to_string()
    };
    AuthError::Network { message }
}
