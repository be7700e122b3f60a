//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default so a minimal file only needs its keys.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

/// Production API address.
pub const DEFAULT_BASE_URL: &str = "https://api.slicingdice.com/v1";

/// Environment variable overriding the API address.
pub const API_ADDRESS_ENV_VAR: &str = "SD_API_ADDRESS";

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// API address, without the `/test` sandbox suffix.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Verify TLS certificates.
    pub use_ssl: bool,

    /// Honor proxy settings from the environment.
    pub use_system_proxy: bool,

    /// Send sandbox-capable calls to `/test`.
    pub uses_test_endpoint: bool,

    pub content_type: String,

    /// API keys. Usually supplied through the environment instead of a file.
    pub keys: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var(API_ADDRESS_ENV_VAR)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: 60,
            use_ssl: true,
            use_system_proxy: true,
            uses_test_endpoint: false,
            content_type: "application/json".to_string(),
            keys: Credentials::default(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_keys(mut self, keys: Credentials) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_test_endpoint(mut self, enabled: bool) -> Self {
        self.uses_test_endpoint = enabled;
        self
    }
}
