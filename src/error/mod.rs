//! Error types for the client.
//!
//! # Data Flow
//! ```text
//! payload checks     → Error::Validation        (before any network call)
//! key resolution     → Error::InvalidCredentials / InsufficientPermission
//! transport          → Error::Transport         (timeout, connection, empty body)
//! body decoding      → Error::Decode
//! embedded code      → catalog.rs → Error::Service
//! non-200 status     → Error::Http
//! ```
//!
//! # Design Decisions
//! - One error enum for every public operation
//! - Errors are returned to the caller, never logged and dropped here

pub mod catalog;

use thiserror::Error;

use crate::auth::AuthLevel;
use crate::config::loader::ConfigError;
use crate::validation::ValidationError;

pub use catalog::{catalog, map_code, CatalogEntry, ErrorCategory, ServiceErrorKind};

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request payload was rejected before sending.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No usable key was configured.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The configured key cannot perform the operation.
    #[error("{actual} key is not allowed to perform an operation requiring {required} access")]
    InsufficientPermission {
        required: AuthLevel,
        actual: AuthLevel,
    },

    /// The HTTP exchange failed or returned no body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The service reported an error code.
    #[error("service error {code} (HTTP {status}): {message}")]
    Service {
        kind: ServiceErrorKind,
        code: i64,
        status: u16,
        message: String,
    },

    /// Non-success HTTP status without an embedded error code.
    #[error("HTTP status code: {0}")]
    Http(u16),

    /// Client configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Build a service error from a raw code, looking it up in the catalog.
    pub fn from_service_code(code: i64, status: u16, message: Option<String>) -> Self {
        let kind = map_code(code);
        Error::Service {
            kind,
            code,
            status,
            message: message.unwrap_or_else(|| kind.message().to_string()),
        }
    }

    /// The catalog kind, when this is a service error.
    pub fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self {
            Error::Service { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True when the error was raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::InvalidCredentials(_)
                | Error::InsufficientPermission { .. }
                | Error::Encode(_)
                | Error::Config(_)
        )
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
