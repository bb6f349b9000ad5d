//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//!
//! - `CRM_DATABASE_URL` - SQLite connection string (default: `sqlite:crm.db`)
//! - `CRM_HOST` - Bind address (default: 127.0.0.1)
//! - `CRM_PORT` - Listen port (default: 8000)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite:crm.db";
const DEFAULT_PORT: u16 = 8000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but unparseable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// CRM service configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// SQLite connection string.
    pub database_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl CrmConfig {
    /// Load configuration from the environment, falling back to local
    /// development defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when a set variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("CRM_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let host = match std::env::var("CRM_HOST") {
            Ok(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidEnvVar("CRM_HOST", e.to_string()))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match std::env::var("CRM_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("CRM_PORT", e.to_string()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
