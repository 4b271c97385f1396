//! Tandem Domain - Core types
//!
//! This crate defines the domain model for the Tandem IDE client:
//! credentials, outgoing requests, responses, projects and editor tabs.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod editor;
pub mod error;
pub mod project;
pub mod request;
pub mod response;

pub use auth::{
    AUTHORIZATION_HEADER, AccessToken, AuthError, AuthScheme, RefreshFailurePolicy, RefreshToken,
};
pub use editor::{EditorTabs, OpenFile, language_for};
pub use error::{DomainError, DomainResult};
pub use project::{PageContent, Paged, Project, ProjectId, ProjectPassword};
pub use request::{Headers, HttpMethod, OutgoingRequest};
pub use response::{HttpResponse, StatusCode};
