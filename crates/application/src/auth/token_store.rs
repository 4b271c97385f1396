//! In-memory credential store.
//!
//! A `TokenStore` is an explicit context object: clones share state, but
//! two stores created separately never see each other's tokens. Hand one
//! to each client factory that should share a session.

use std::sync::Arc;

use tandem_domain::{AccessToken, RefreshToken};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct TokenState {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
}

/// Thread-safe holder of the current session's tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    state: Arc<RwLock<TokenState>>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a session.
    #[must_use]
    pub fn with_tokens(access_token: AccessToken, refresh_token: Option<RefreshToken>) -> Self {
        Self {
            state: Arc::new(RwLock::new(TokenState {
                access_token,
                refresh_token,
            })),
        }
    }

    /// Current access token. Empty when not logged in.
    pub async fn access_token(&self) -> AccessToken {
        self.state.read().await.access_token.clone()
    }

    /// Current refresh token.
    pub async fn refresh_token(&self) -> Option<RefreshToken> {
        self.state.read().await.refresh_token.clone()
    }

    /// Replaces the access token, keeping the refresh token.
    pub async fn set_access_token(&self, token: AccessToken) {
        let mut state = self.state.write().await;
        debug!(token = %token.preview(), "access token updated");
        state.access_token = token;
    }

    /// Replaces the refresh token (e.g. after rotation).
    pub async fn set_refresh_token(&self, token: RefreshToken) {
        self.state.write().await.refresh_token = Some(token);
    }

    /// Stores both tokens from a login response.
    pub async fn login(&self, access_token: AccessToken, refresh_token: Option<RefreshToken>) {
        let mut state = self.state.write().await;
        state.access_token = access_token;
        state.refresh_token = refresh_token;
        debug!("session stored");
    }

    /// Drops both tokens.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        *state = TokenState::default();
        debug!("session cleared");
    }

    /// Session status for display.
    pub async fn status(&self) -> TokenStatus {
        let state = self.state.read().await;
        if state.access_token.is_empty() {
            TokenStatus::NotAuthenticated {
                can_refresh: state.refresh_token.is_some(),
            }
        } else {
            TokenStatus::Authenticated {
                can_refresh: state.refresh_token.is_some(),
            }
        }
    }
}

/// Status of the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token is held.
    NotAuthenticated {
        /// Whether a refresh token could obtain one.
        can_refresh: bool,
    },
    /// An access token is held.
    Authenticated {
        /// Whether it can be refreshed.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Returns true if an access token is held.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub const fn display_message(self) -> &'static str {
        match self {
            Self::NotAuthenticated { can_refresh: true } => "Not authenticated (can refresh)",
            Self::NotAuthenticated { can_refresh: false } => "Not authenticated",
            Self::Authenticated { can_refresh: true } => "Authenticated (will auto-refresh)",
            Self::Authenticated { can_refresh: false } => "Authenticated",
        }
    }
}
