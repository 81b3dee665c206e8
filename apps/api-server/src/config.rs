//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use actix_web::http::Uri;
use postbox_core::domain::Schema;

/// Where the post collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// Durable mode: a JSON document flushed after every mutation.
    File(PathBuf),
    /// Process-memory mode: lost on restart. For tests and throwaway deployments.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageMode,
    pub schema: Schema,
    pub cors_origin: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid {name} '{value}': {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError {
                name: "PORT",
                value: raw.clone(),
                reason: "expected a port number".to_string(),
            })?,
            None => 5002,
        };

        let storage = match get("POSTS_STORAGE").as_deref().map(str::to_ascii_lowercase) {
            None => StorageMode::File(Self::posts_file(&get)),
            Some(mode) if mode == "file" => StorageMode::File(Self::posts_file(&get)),
            Some(mode) if mode == "memory" => StorageMode::Memory,
            Some(other) => {
                return Err(ConfigError {
                    name: "POSTS_STORAGE",
                    value: other,
                    reason: "supported: file, memory".to_string(),
                });
            }
        };

        let schema = match get("POSTS_SCHEMA") {
            Some(raw) => raw.parse::<Schema>().map_err(|reason| ConfigError {
                name: "POSTS_SCHEMA",
                value: raw.clone(),
                reason,
            })?,
            None => Schema::extended(),
        };

        let cors_origin = get("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string());
        if cors_origin != "*" && !is_origin(&cors_origin) {
            return Err(ConfigError {
                name: "CORS_ALLOWED_ORIGIN",
                value: cors_origin,
                reason: "expected `*` or scheme://host[:port]".to_string(),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            storage,
            schema,
            cors_origin,
        })
    }

    fn posts_file(get: &impl Fn(&str) -> Option<String>) -> PathBuf {
        get("POSTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/posts.json"))
    }
}

fn is_origin(value: &str) -> bool {
    value.parse::<Uri>().is_ok_and(|uri| {
        uri.scheme().is_some()
            && uri.host().is_some()
            && uri.path() == "/"
            && uri.query().is_none()
    })
}
