//! Authentication module for the Tandem client.
//!
//! This module provides:
//! - The in-memory token store handed to each client
//! - The refresh procedure port and its coalescing wrapper
//! - The request interceptor that attaches the access token

mod interceptor;
mod refresh;
mod token_store;

pub use interceptor::{AuthorizationInterceptor, InterceptorOptions};
pub use refresh::{CoalescingRefresh, RefreshProcedure};
pub use token_store::{TokenStatus, TokenStore};
