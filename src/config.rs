//! Configuration management for the Contact Manager.
//!
//! This module handles loading and validating configuration from environment
//! variables, after reading a `.env` file if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Configuration for the Contact Manager.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP and WebSocket listen address (default: 127.0.0.1:5000)
    pub listen_addr: SocketAddr,

    /// JSON data file; `None` keeps contacts in memory only
    pub data_file: Option<PathBuf>,

    /// Pending signals buffered per connected client (default: 16)
    pub client_queue_capacity: usize,

    /// Per-frame WebSocket send timeout in seconds (default: 10)
    pub client_send_timeout_secs: u64,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CONTACTS_LISTEN_ADDR`: socket address to bind
    /// - `CONTACTS_DATA_FILE`: path of the JSON store
    /// - `CLIENT_QUEUE_CAPACITY`: per-client signal queue, > 0
    /// - `CLIENT_SEND_TIMEOUT_SECS`: per-frame send timeout, > 0
    /// - `LOG_LEVEL`: fallback log filter
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let listen_addr = match env::var("CONTACTS_LISTEN_ADDR") {
            Ok(val) => val
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "CONTACTS_LISTEN_ADDR".to_string(),
                    reason: format!(
                        "Must be a socket address like {}, got: {}",
                        DEFAULT_LISTEN_ADDR, val
                    ),
                })?,
            Err(_) => Self::default_listen_addr(),
        };

        let data_file = env::var("CONTACTS_DATA_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let client_queue_capacity = Self::parse_env_nonzero("CLIENT_QUEUE_CAPACITY", 16)?;
        let client_send_timeout_secs =
            Self::parse_env_nonzero("CLIENT_SEND_TIMEOUT_SECS", 10)? as u64;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            listen_addr,
            data_file,
            client_queue_capacity,
            client_send_timeout_secs,
            log_level,
        })
    }

    /// Send timeout as a `Duration`.
    pub fn client_send_timeout(&self) -> Duration {
        Duration::from_secs(self.client_send_timeout_secs)
    }

    fn default_listen_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 5000))
    }

    /// Parse an environment variable as a positive integer with a default value.
    fn parse_env_nonzero(var_name: &str, default: usize) -> ConfigResult<usize> {
        let value = match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            })?,
            Err(_) => return Ok(default),
        };

        if value == 0 {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        Ok(value)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: Self::default_listen_addr(),
            data_file: None,
            client_queue_capacity: 16,
            client_send_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}
