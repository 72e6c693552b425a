//! Store configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, or built in code with the builder methods.
//!
//! | Variable               | Default     | Meaning                         |
//! |------------------------|-------------|---------------------------------|
//! | `STOCKROOM_BACKEND`    | `memory`    | `memory` or `redis`             |
//! | `REDIS_URL`            | none        | required when backend is redis  |
//! | `STOCKROOM_KEY_PREFIX` | `stockroom` | namespace for Redis keys        |
//! | `STOCKROOM_COLLECTION` | `products`  | collection the repository uses  |

use std::env;
use std::fmt;
use std::str::FromStr;

use stockroom_core::DEFAULT_COLLECTION;

/// Default Redis key namespace.
pub const DEFAULT_KEY_PREFIX: &str = "stockroom";

/// Which store implementation to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// In-process collections; state is lost on exit.
    #[default]
    Memory,
    /// Redis server addressed by `redis_url`.
    Redis,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Backend::Memory),
            "redis" => Ok(Backend::Redis),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => f.write_str("memory"),
            Backend::Redis => f.write_str("redis"),
        }
    }
}

/// Store configuration.
///
/// ## Example
/// ```rust
/// use stockroom_db::{Backend, StoreConfig};
///
/// let config = StoreConfig::redis("redis://localhost:6379/0")
///     .key_prefix("shop")
///     .collection("catalog");
///
/// assert_eq!(config.backend, Backend::Redis);
/// assert_eq!(config.collection, "catalog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store implementation.
    pub backend: Backend,

    /// Redis connection string (redis backend only).
    pub redis_url: Option<String>,

    /// Namespace for every Redis key.
    pub key_prefix: String,

    /// Collection the product repository uses.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::memory()
    }
}

impl StoreConfig {
    /// In-memory store configuration.
    pub fn memory() -> Self {
        StoreConfig {
            backend: Backend::Memory,
            redis_url: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Redis store configuration.
    pub fn redis(url: impl Into<String>) -> Self {
        StoreConfig {
            backend: Backend::Redis,
            redis_url: Some(url.into()),
            ..StoreConfig::memory()
        }
    }

    /// Sets the Redis key namespace.
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        StoreConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, file, map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("STOCKROOM_BACKEND") {
            Some(raw) => raw.parse()?,
            None => Backend::Memory,
        };

        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        let key_prefix = lookup("STOCKROOM_KEY_PREFIX")
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());
        if key_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("STOCKROOM_KEY_PREFIX".to_string()));
        }

        let collection = lookup("STOCKROOM_COLLECTION")
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue("STOCKROOM_COLLECTION".to_string()));
        }

        if backend == Backend::Redis && redis_url.is_none() {
            return Err(ConfigError::MissingRequired("REDIS_URL".to_string()));
        }

        Ok(StoreConfig {
            backend,
            redis_url,
            key_prefix,
            collection,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown store backend '{0}' (expected 'memory' or 'redis')")]
    UnknownBackend(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::memory());
        assert_eq!(config.collection, "products");
        assert_eq!(config.key_prefix, "stockroom");
    }

    #[test]
    fn test_redis_from_env() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("STOCKROOM_BACKEND", "Redis"),
            ("REDIS_URL", "redis://cache:6379/2"),
            ("STOCKROOM_COLLECTION", "catalog"),
        ]))
        .unwrap();

        assert_eq!(config.backend, Backend::Redis);
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379/2"));
        assert_eq!(config.collection, "catalog");
    }

    #[test]
    fn test_redis_requires_url() {
        let err = StoreConfig::from_lookup(lookup(&[("STOCKROOM_BACKEND", "redis")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref key) if key == "REDIS_URL"));
    }

    #[test]
    fn test_rejects_unknown_backend_and_blank_names() {
        assert!(matches!(
            StoreConfig::from_lookup(lookup(&[("STOCKROOM_BACKEND", "sqlite")])),
            Err(ConfigError::UnknownBackend(_))
        ));
        assert!(matches!(
            StoreConfig::from_lookup(lookup(&[("STOCKROOM_COLLECTION", " ")])),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
