use std::net::SocketAddr;

use chrono::Duration;

use otriples_core::ValidationConfig;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub validation: ValidationConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("OTRIPLES_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("OTRIPLES_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let database_url = std::env::var("OTRIPLES_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://otriples.db".to_string());

        let recent_window_secs = match std::env::var("OTRIPLES_RECENT_WINDOW_SECS") {
            Ok(s) => Self::parse_window(&s)?,
            Err(_) => 60,
        };

        Ok(Config {
            listen_addr,
            database_url,
            validation: ValidationConfig::with_recent_window(Duration::seconds(
                recent_window_secs,
            )),
        })
    }

    fn parse_window(value: &str) -> Result<i64, ConfigError> {
        match value.trim().parse::<i64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::Invalid(
                "OTRIPLES_RECENT_WINDOW_SECS",
                "must be a positive number of seconds",
            )),
        }
    }

    /// Create a test configuration.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Config {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
