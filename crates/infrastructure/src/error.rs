//! Infrastructure error types

use tandem_application::HttpClientError;
use thiserror::Error;

/// Errors raised while wiring the client from settings.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Settings could not be loaded or are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP transport could not be created.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(error: config::ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}
