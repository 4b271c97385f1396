//! Tandem Infrastructure - Adapters and wiring
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the settings loader, and the
//! factory that assembles the shared authenticated client.

pub mod adapters;
pub mod auth;
pub mod error;
pub mod factory;
pub mod settings;

pub use adapters::ReqwestHttpClient;
pub use auth::HttpRefreshProcedure;
pub use settings::ClientSettings;
pub use error::InfrastructureError;
pub use factory::build_client;
