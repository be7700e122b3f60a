//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::auth::Credentials;
use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, FieldError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<FieldError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), base_url = %config.base_url, "Loaded client configuration");
    Ok(config)
}

/// Like [`load_config`], with keys from the environment overriding the file.
pub fn load_config_with_env(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    config.keys = config.keys.merge(Credentials::from_env());

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Defaults plus keys read from the environment.
pub fn from_env() -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::default().with_keys(Credentials::from_env());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            base_url = "http://127.0.0.1:8080"
            timeout_secs = 10

            [keys]
            read_key = "r"
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.keys.read_key.as_deref(), Some("r"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("timeout_secs = \"soon\"");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let file = write_config("base_url = \"ftp://x\"\ntimeout_secs = 0\n");
        let err = load_config(file.path()).unwrap_err();
        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().starts_with("Validation failed: base_url"));
    }
}
