//! Key resolution and authorization.
//!
//! # Data Flow
//! ```text
//! Credentials (config file / env / builder)
//!     → keys.rs KeyResolver::new (pick highest-priority non-empty key, once)
//!     → check_authorization(required level) per call
//!     → key string placed in the Authorization header
//! ```
//!
//! # Design Decisions
//! - Priority is Master > Custom > Write > Read; Master and Custom both grant
//!   the master level
//! - Non-master keys must match the required level exactly. A write key cannot
//!   run read-only queries; this segregates read and write keys rather than
//!   forming a hierarchy
//! - Keys never appear in Debug output or log events

pub mod keys;

pub use keys::{AuthLevel, Credentials, KeyKind, KeyResolver};
