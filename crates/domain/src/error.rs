//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A project password is outside the accepted length range.
    #[error("password must be between {min} and {max} characters, got {actual}")]
    InvalidPasswordLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A file is not open in the editor.
    #[error("file is not open: {0}")]
    FileNotOpen(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
