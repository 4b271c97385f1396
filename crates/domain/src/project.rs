//! Project listing and management types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A project the user owns or has been invited to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Language the project is set up for.
    pub programming_language: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Last modification time as reported by the backend.
    pub updated_at: String,
}

/// Envelope the backend wraps paged listings in:
/// `{ "results": { "content": [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    /// Page wrapper.
    pub results: PageContent<T>,
}

/// Inner page of a [`Paged`] listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PageContent<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

impl<T> Paged<T> {
    /// Unwraps the listing into its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.results.content
    }
}

/// Non-empty project identifier, safe to place in a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Validates a project id.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` for empty ids or ids containing `/`.
    pub fn parse(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() || trimmed.contains('/') {
            return Err(DomainError::InvalidIdentifier(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A new project password that passed length validation.
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectPassword(String);

impl ProjectPassword {
    /// Minimum accepted length in characters.
    pub const MIN_LEN: usize = 4;
    /// Maximum accepted length in characters.
    pub const MAX_LEN: usize = 10;

    /// Validates a new password.
    ///
    /// # Errors
    /// Returns `InvalidPasswordLength` outside `MIN_LEN..=MAX_LEN`.
    pub fn parse(password: impl Into<String>) -> DomainResult<Self> {
        let password = password.into();
        let actual = password.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&actual) {
            return Err(DomainError::InvalidPasswordLength {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(password))
    }

    /// Returns the password string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ProjectPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProjectPassword(***)")
    }
}
