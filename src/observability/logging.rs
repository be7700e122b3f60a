//! Structured logging.
//!
//! # Responsibilities
//! - Initialize a tracing subscriber for binaries and demos
//! - Configure log level at runtime through `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Falls back to a caller-supplied filter when `RUST_LOG` is unset

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter: client events at debug, everything else at info.
pub const DEFAULT_FILTER: &str = "slicingdice=debug,info";

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
