//! Configuration loading and representation.
//!
//! Values come from the process environment; everything has a default so a
//! bare `cargo run` works against an in-memory database.

use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "STOREFRONT_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "STOREFRONT_DB_MAX_CONNECTIONS";

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// sqlx connection URL (e.g. `sqlite::memory:`, `sqlite://storefront.db?mode=rwc`).
    pub database_url: String,
    pub max_connections: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StorefrontConfig {
    /// Load from `STOREFRONT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(DATABASE_URL_VAR) {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: DATABASE_URL_VAR,
                    value: url,
                    reason: "must not be blank",
                });
            }
            config.database_url = url;
        }

        if let Some(raw) = lookup(MAX_CONNECTIONS_VAR) {
            config.max_connections = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: MAX_CONNECTIONS_VAR,
                        value: raw,
                        reason: "expected a positive integer",
                    });
                }
            };
        }

        Ok(config)
    }
}
