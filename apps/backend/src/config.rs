//! Service configuration read from the environment.

use std::str::FromStr;

use thiserror::Error;
use vocab_core::types::EngineSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Backend configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Hour (0-23) at which a new study day begins.
    pub daily_reset_hour: u32,
    /// Session size used when a request gives none.
    pub default_session_size: usize,
    pub engine: EngineSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: DATABASE_URL. Optional: HOST, PORT, DAILY_RESET_HOUR,
    /// SESSION_DEFAULT_SIZE.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let daily_reset_hour: u32 = parse_var("DAILY_RESET_HOUR", 0)?;
        if daily_reset_hour > 23 {
            return Err(ConfigError::Invalid {
                name: "DAILY_RESET_HOUR",
                value: daily_reset_hour.to_string(),
            });
        }

        let default_session_size: usize = parse_var("SESSION_DEFAULT_SIZE", 10)?;
        if default_session_size == 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_DEFAULT_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            daily_reset_hour,
            default_session_size,
            engine: EngineSettings::default(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuration for tests, pointing at the given database.
    pub fn for_database(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            daily_reset_hour: 0,
            default_session_size: 10,
            engine: EngineSettings::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
