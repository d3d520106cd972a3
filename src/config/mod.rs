//! Configuration loading and management
//!
//! The connection string is looked up in the process environment first, then
//! in a secret store (a flat YAML file of `key: value` pairs). The resolved
//! [`DatabaseConfig`] is built once at startup and handed to the store; there
//! is no global state.

use crate::core::error::ConfigError;
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Key under which the connection string is stored, in both sources
pub const DATABASE_URL_KEY: &str = "NEON_DATABASE_URL";

/// Environment variable naming the listen address
pub const ADDR_ENV: &str = "ORDER_DESK_ADDR";

/// Environment variable naming the secrets file
pub const SECRETS_PATH_ENV: &str = "ORDER_DESK_SECRETS";

const DEFAULT_ADDR: &str = "127.0.0.1:8501";
const DEFAULT_SECRETS_PATH: &str = "secrets.yaml";

/// Source of secrets that are not in the process environment
pub trait SecretStore: Send + Sync {
    /// Non-empty value for `key`, if present
    fn get(&self, key: &str) -> Option<String>;
}

/// Secret store with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySecretStore;

impl SecretStore for EmptySecretStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Secret store backed by a flat YAML mapping
#[derive(Debug, Clone, Default)]
pub struct YamlSecretStore {
    values: HashMap<String, Value>,
}

impl YamlSecretStore {
    /// Load secrets from a YAML file
    ///
    /// A file that does not exist is an empty store. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No secrets file, using empty secret store");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::SecretStore {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::SecretStore { message, .. } => ConfigError::SecretStore {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Load secrets from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let values: HashMap<String, Value> =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::SecretStore {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { values })
    }
}

impl SecretStore for YamlSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Where the connection string was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    SecretStore,
    Explicit,
}

/// Database settings passed into the store
///
/// An unresolved connection string is not an error here; it becomes a
/// [`ConfigError`] the first time a connection is attempted.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    connection_string: Option<String>,
    source: Option<ConfigSource>,
}

impl DatabaseConfig {
    /// Resolve from the process environment, then `secrets`
    pub fn resolve(secrets: &dyn SecretStore) -> Self {
        Self::resolve_with(|key| std::env::var(key).ok(), secrets)
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with<F>(env: F, secrets: &dyn SecretStore) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(DATABASE_URL_KEY).filter(|v| !v.is_empty()) {
            return Self {
                connection_string: Some(url),
                source: Some(ConfigSource::Environment),
            };
        }

        if let Some(url) = secrets.get(DATABASE_URL_KEY) {
            return Self {
                connection_string: Some(url),
                source: Some(ConfigSource::SecretStore),
            };
        }

        Self::default()
    }

    /// Use a known connection string
    pub fn from_connection_string(url: impl Into<String>) -> Self {
        Self {
            connection_string: Some(url.into()),
            source: Some(ConfigSource::Explicit),
        }
    }

    /// The connection string, or the fatal configuration error
    pub fn connection_string(&self) -> Result<&str, ConfigError> {
        self.connection_string
            .as_deref()
            .ok_or_else(|| ConfigError::MissingConnectionString {
                key: DATABASE_URL_KEY.to_string(),
            })
    }

    pub fn source(&self) -> Option<ConfigSource> {
        self.source
    }
}

// Never print credentials
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field(
                "connection_string",
                &self.connection_string.as_ref().map(|_| "<redacted>"),
            )
            .field("source", &self.source)
            .finish()
    }
}

/// Process-level settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP surface listens on
    pub bind_addr: SocketAddr,

    /// Path of the YAML secrets file
    pub secrets_path: PathBuf,
}

impl ServerConfig {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings with an explicit environment lookup
    pub fn from_lookup<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = env(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidSetting {
                key: ADDR_ENV.to_string(),
                message: e.to_string(),
            }
        })?;

        let secrets_path = env(SECRETS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH));

        Ok(Self {
            bind_addr,
            secrets_path,
        })
    }
}
