//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the API address is an absolute http(s) URL
//! - Validate value ranges (timeout > 0)
//! - Reject keys that cannot travel in a header
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<FieldError>>
//! - Missing keys are not a config error; the key resolver reports them

use std::fmt;

use url::Url;

use crate::auth::KeyKind;
use crate::config::schema::ClientConfig;

/// A single invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(FieldError::new("base_url", "must not carry a query or fragment"));
            }
        }
        Ok(url) => errors.push(FieldError::new(
            "base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(FieldError::new("base_url", e.to_string())),
    }

    if config.timeout_secs == 0 {
        errors.push(FieldError::new("timeout_secs", "must be greater than zero"));
    }

    if config.content_type.trim().is_empty() {
        errors.push(FieldError::new("content_type", "must not be empty"));
    }

    for kind in KeyKind::PRIORITY {
        if let Some(key) = config.keys.get(kind) {
            if key.chars().any(|c| c.is_control()) {
                errors.push(FieldError::new(
                    format!("keys.{}", key_field(kind)),
                    "must not contain control characters",
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn key_field(kind: KeyKind) -> &'static str {
    match kind {
        KeyKind::Master => "master_key",
        KeyKind::Custom => "custom_key",
        KeyKind::Write => "write_key",
        KeyKind::Read => "read_key",
    }
}
