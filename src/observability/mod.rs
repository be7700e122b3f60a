//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and config loader produce:
//!     → tracing events (method, URL, required level, status)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, filtered by RUST_LOG)
//!     → or any subscriber the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the caller's choice
//! - API keys never appear in events

pub mod logging;

pub use logging::init_logging;
