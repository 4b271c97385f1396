//! Tandem Application - Authenticated request pipeline and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The token store, refresh procedure and authorization interceptor
//! - The shared authenticated client
//! - Project use cases
//! - Application-level error handling

pub mod auth;
pub mod client;
pub mod error;
pub mod interceptor;
pub mod ports;
pub mod use_cases;

pub use auth::{
    AuthorizationInterceptor, CoalescingRefresh, InterceptorOptions, RefreshProcedure,
    TokenStatus, TokenStore,
};
pub use client::AuthenticatedClient;
pub use error::{ApplicationError, ApplicationResult};
pub use interceptor::RequestInterceptor;
pub use ports::{HttpClient, HttpClientError};
pub use use_cases::{
    ChangeProjectPassword, ChangeProjectPasswordInput, DeleteProject, ListJoinedProjects,
};
