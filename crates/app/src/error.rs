//! Errors surfaced by the command line front end.

use tandem_application::ApplicationError;
use tandem_infrastructure::InfrastructureError;
use thiserror::Error;

/// Top-level error for a command run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings could not be loaded or the client could not be built.
    #[error(transparent)]
    Setup(#[from] InfrastructureError),

    /// The command itself failed.
    #[error(transparent)]
    Command(#[from] ApplicationError),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Hint shown after the error message, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Command(e) if e.is_unauthorized() => {
                Some("the backend rejected the credentials; log in again or pass --refresh-token")
            }
            _ => None,
        }
    }
}

/// Result alias for command runs.
pub type AppResult<T> = Result<T, AppError>;
