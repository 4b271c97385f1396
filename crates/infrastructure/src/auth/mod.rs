//! Authentication infrastructure adapters.

mod http_refresh;

pub use http_refresh::HttpRefreshProcedure;
