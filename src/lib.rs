//! Client SDK for the SlicingDice analytics database API.
//!
//! Every operation follows the same path: the typed payload is validated,
//! the configured key is checked against the operation's required level,
//! one HTTP request is sent and the response is decoded, with service error
//! codes mapped through a static catalog.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod validation;

pub use auth::{AuthLevel, Credentials};
pub use client::SlicingDice;
pub use config::schema::ClientConfig;
pub use error::{Error, Result, ServiceErrorKind};
pub use validation::{Validate, ValidationError};
