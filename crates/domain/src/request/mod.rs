//! Outgoing request types

mod header;
mod method;
mod outgoing;

pub use header::Headers;
pub use method::HttpMethod;
pub use outgoing::OutgoingRequest;
