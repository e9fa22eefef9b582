//! Configuration loading and representation.
//!
//! Everything comes from environment variables with development defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `STOCKBOARD_BIND_ADDR` | `0.0.0.0:4000` | HTTP listen address |
//! | `DATABASE_URL` | unset | Postgres URL; unset selects the in-memory store |
//! | `STOCKBOARD_SEED` | `true` | Seed the demo catalogue into an empty store |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub seed: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("STOCKBOARD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "STOCKBOARD_BIND_ADDR",
            message: format!("{bind_raw}: {e}"),
        })?;

        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let seed = match lookup("STOCKBOARD_SEED") {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                key: "STOCKBOARD_SEED",
                message: format!("expected true/false, got '{v}'"),
            })?,
        };

        Ok(Self {
            bind_addr,
            database_url,
            seed,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
            database_url: None,
            seed: true,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
