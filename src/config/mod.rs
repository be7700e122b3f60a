//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or defaults
//!     → loader.rs (parse & deserialize, overlay env keys)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → Dispatcher (resolves key, builds HTTP client)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a client is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with_env, ConfigError};
pub use schema::ClientConfig;
