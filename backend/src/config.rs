//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_*` environment variables, or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr { value: String, message: String },
    #[error("pool size must be at least 1")]
    PoolSize,
}

/// Settings for the user directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it users live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Serve without applying embedded migrations first.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::PoolSize),
            size => Ok(size),
        }
    }

    /// Whether startup applies pending migrations. On unless skipped.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}
