//! Credential set and key resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the master key.
pub const MASTER_KEY_ENV_VAR: &str = "SD_MASTER_KEY";
/// Environment variable holding the custom key.
pub const CUSTOM_KEY_ENV_VAR: &str = "SD_CUSTOM_KEY";
/// Environment variable holding the write key.
pub const WRITE_KEY_ENV_VAR: &str = "SD_WRITE_KEY";
/// Environment variable holding the read key.
pub const READ_KEY_ENV_VAR: &str = "SD_READ_KEY";

/// Authorization level granted by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    Read = 0,
    Write = 1,
    Master = 2,
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthLevel::Read => write!(f, "read"),
            AuthLevel::Write => write!(f, "write"),
            AuthLevel::Master => write!(f, "master"),
        }
    }
}

/// Which credential slot a key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Master,
    Custom,
    Write,
    Read,
}

impl KeyKind {
    /// Resolution order, highest priority first.
    pub const PRIORITY: [KeyKind; 4] = [KeyKind::Master, KeyKind::Custom, KeyKind::Write, KeyKind::Read];

    pub fn level(self) -> AuthLevel {
        match self {
            KeyKind::Master | KeyKind::Custom => AuthLevel::Master,
            KeyKind::Write => AuthLevel::Write,
            KeyKind::Read => AuthLevel::Read,
        }
    }
}

/// Up to four API keys. Empty strings count as absent.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Credentials {
    pub master_key: Option<String>,
    pub custom_key: Option<String>,
    pub write_key: Option<String>,
    pub read_key: Option<String>,
}

impl Credentials {
    pub fn with_master_key(mut self, key: impl Into<String>) -> Self {
        self.master_key = Some(key.into());
        self
    }

    pub fn with_custom_key(mut self, key: impl Into<String>) -> Self {
        self.custom_key = Some(key.into());
        self
    }

    pub fn with_write_key(mut self, key: impl Into<String>) -> Self {
        self.write_key = Some(key.into());
        self
    }

    pub fn with_read_key(mut self, key: impl Into<String>) -> Self {
        self.read_key = Some(key.into());
        self
    }

    /// Load keys from `SD_MASTER_KEY`, `SD_CUSTOM_KEY`, `SD_WRITE_KEY` and
    /// `SD_READ_KEY`. Unset variables leave the slot empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            master_key: var(MASTER_KEY_ENV_VAR),
            custom_key: var(CUSTOM_KEY_ENV_VAR),
            write_key: var(WRITE_KEY_ENV_VAR),
            read_key: var(READ_KEY_ENV_VAR),
        }
    }

    /// Overlay `other` on top of `self`: slots set in `other` win.
    pub fn merge(self, other: Credentials) -> Self {
        Self {
            master_key: other.master_key.or(self.master_key),
            custom_key: other.custom_key.or(self.custom_key),
            write_key: other.write_key.or(self.write_key),
            read_key: other.read_key.or(self.read_key),
        }
    }

    /// The key in a slot, if present and non-empty.
    pub fn get(&self, kind: KeyKind) -> Option<&str> {
        let slot = match kind {
            KeyKind::Master => &self.master_key,
            KeyKind::Custom => &self.custom_key,
            KeyKind::Write => &self.write_key,
            KeyKind::Read => &self.read_key,
        };
        slot.as_deref().filter(|k| !k.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        KeyKind::PRIORITY.iter().all(|kind| self.get(*kind).is_none())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |kind: KeyKind| if self.get(kind).is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("master_key", &mark(KeyKind::Master))
            .field("custom_key", &mark(KeyKind::Custom))
            .field("write_key", &mark(KeyKind::Write))
            .field("read_key", &mark(KeyKind::Read))
            .finish()
    }
}

/// The single key used for every call, resolved once at construction.
#[derive(Clone)]
pub struct KeyResolver {
    key: String,
    kind: KeyKind,
}

impl KeyResolver {
    /// Pick the highest-priority key.
    ///
    /// Fails with `InvalidCredentials` when every slot is empty.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        KeyKind::PRIORITY
            .iter()
            .find_map(|kind| {
                credentials.get(*kind).map(|key| Self {
                    key: key.to_string(),
                    kind: *kind,
                })
            })
            .ok_or_else(|| Error::InvalidCredentials("no API key configured".to_string()))
    }

    /// The resolved key and the level it grants.
    pub fn resolve(&self) -> (&str, AuthLevel) {
        (&self.key, self.kind.level())
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn level(&self) -> AuthLevel {
        self.kind.level()
    }

    /// Return the key if it may perform an operation requiring `required`.
    ///
    /// Master-level keys are always authorized. Other keys must match the
    /// required level exactly.
    pub fn check_authorization(&self, required: AuthLevel) -> Result<&str> {
        let actual = self.level();
        if actual == AuthLevel::Master || actual == required {
            return Ok(&self.key);
        }
        Err(Error::InsufficientPermission { required, actual })
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver")
            .field("kind", &self.kind)
            .field("key", &"<redacted>")
            .finish()
    }
}
