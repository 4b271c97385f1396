//! Response types

mod http_response;

pub use http_response::{HttpResponse, StatusCode};
