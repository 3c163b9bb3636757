// src/config.rs
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "vigilancia.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            max_workers: 8,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("VIGILANCIA_BIND_ADDR") {
            cfg.bind_addr = v.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "VIGILANCIA_BIND_ADDR",
                value: v.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(v) = lookup("VIGILANCIA_DB_PATH") {
            cfg.db_path = v;
        }
        if let Some(v) = lookup("VIGILANCIA_SCHEMA_PATH") {
            cfg.schema_path = v;
        }
        if let Some(v) = lookup("VIGILANCIA_MAX_WORKERS") {
            cfg.max_workers = match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "VIGILANCIA_MAX_WORKERS",
                        value: v,
                        reason: "expected a positive integer".into(),
                    })
                }
            };
        }
        if let Some(v) = lookup("VIGILANCIA_LOG") {
            cfg.log_filter = v;
        }

        Ok(cfg)
    }
}
