//! HTTP request subsystem.
//!
//! # Data Flow
//! ```text
//! client operation (validated payload)
//!     → dispatcher.rs (authorize key, build headers, encode body)
//!     → endpoints.rs (resolve URL, optional /test sandbox suffix)
//!     → request.rs (reqwest exchange with per-call timeout)
//!     → response.rs (decode JSON, map error codes, check status)
//!     → decoded payload + status/headers metadata
//! ```
//!
//! # Design Decisions
//! - Exactly one HTTP exchange per call; no retries
//! - Key authorization happens before any bytes leave the client
//! - DELETE is sent as a real HTTP DELETE

pub mod dispatcher;
pub mod endpoints;
pub mod request;
pub mod response;

pub use dispatcher::Dispatcher;
pub use endpoints::Endpoint;
pub use request::Requester;
pub use response::{handle_response, ApiResponse, RawResponse, ResponseMeta};
