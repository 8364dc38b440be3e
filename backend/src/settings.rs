//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `JOKES_*` environment variables or a config
//! file, in ortho_config's usual precedence. Session cookie settings are read
//! separately by [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// The configured bind address did not parse.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address '{value}': {source}")]
pub struct BindAddrError {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

/// Process-level settings for the jokes server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOKES")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, jokes live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| BindAddrError {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool settings, when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }
}
