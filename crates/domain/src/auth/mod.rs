//! Authentication domain types

mod types;

pub use types::{
    AUTHORIZATION_HEADER, AccessToken, AuthError, AuthScheme, RefreshFailurePolicy, RefreshToken,
};
