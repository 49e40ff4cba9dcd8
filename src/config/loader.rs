//! Load server config from the process environment (after `.env`), or from any key lookup.

use crate::config::types::*;
use crate::error::ConfigError;

pub const ENV_DB_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_CREATE_DATABASE: &str = "DB_CREATE_IF_MISSING";
pub const ENV_STORE: &str = "STORE";

impl ServerConfig {
    /// Read `.env` if present, then the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from a key lookup. Unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = ServerConfig::default();

        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: ENV_PORT,
                message: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(max) = get(ENV_MAX_CONNECTIONS) {
            config.max_connections = match max.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_MAX_CONNECTIONS,
                        message: format!("'{}' is not a positive integer", max),
                    })
                }
            };
        }
        if let Some(flag) = get(ENV_CREATE_DATABASE) {
            config.create_database = parse_bool(&flag).ok_or_else(|| ConfigError::Invalid {
                key: ENV_CREATE_DATABASE,
                message: format!("'{}' is not a boolean", flag),
            })?;
        }
        if let Some(store) = get(ENV_STORE) {
            config.store = match store.to_lowercase().as_str() {
                "postgres" | "postgresql" => StoreKind::Postgres,
                "memory" => StoreKind::Memory,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_STORE,
                        message: format!("'{}' is not one of: postgres, memory", store),
                    })
                }
            };
        }

        config.database_url = get(ENV_DB_CONNECTION_STRING).or_else(|| get(ENV_DATABASE_URL));
        if config.store == StoreKind::Postgres && config.database_url.is_none() {
            return Err(ConfigError::Missing(ENV_DB_CONNECTION_STRING));
        }
        Ok(config)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
