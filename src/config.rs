//! Configuration module for the documentation gateway
//!
//! All settings come from environment variables with defaults from
//! `utils::constants`. `PORT` wins over `D3BUGR_PORT` so platform-assigned
//! ports work unchanged.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_DOCS_DIR, DEFAULT_HOST, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MCP_PREFIX,
    DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_APP_PORT, ENV_DOCS_DIR, ENV_HOST,
    ENV_MAX_CONCURRENT_REQUESTS, ENV_MCP_PREFIX, ENV_PORT, ENV_REQUEST_TIMEOUT_SECS,
};

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Directory holding the `*.json` documents
    pub docs_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Cap on in-flight requests
    pub max_concurrent_requests: usize,
    /// Prefix reported for MCP tool names
    pub mcp_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            mcp_prefix: DEFAULT_MCP_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Empty values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var(ENV_PORT).map(|v| (ENV_PORT, v)).or_else(|| {
            var(ENV_APP_PORT).map(|v| (ENV_APP_PORT, v))
        }) {
            Some((name, value)) => parse_value::<u16>(name, &value)?,
            None => defaults.port,
        };

        let request_timeout_secs = match var(ENV_REQUEST_TIMEOUT_SECS) {
            Some(value) => parse_value::<u64>(ENV_REQUEST_TIMEOUT_SECS, &value)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            return Err(AppError::invalid_config(
                ENV_REQUEST_TIMEOUT_SECS,
                "0",
                "must be greater than zero",
            ));
        }

        let max_concurrent_requests = match var(ENV_MAX_CONCURRENT_REQUESTS) {
            Some(value) => parse_value::<usize>(ENV_MAX_CONCURRENT_REQUESTS, &value)?,
            None => defaults.max_concurrent_requests,
        };
        if max_concurrent_requests == 0 {
            return Err(AppError::invalid_config(
                ENV_MAX_CONCURRENT_REQUESTS,
                "0",
                "must be greater than zero",
            ));
        }

        let config = Self {
            host: var(ENV_HOST).unwrap_or(defaults.host),
            port,
            docs_dir: var(ENV_DOCS_DIR).map(PathBuf::from).unwrap_or(defaults.docs_dir),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_concurrent_requests,
            mcp_prefix: lookup(ENV_MCP_PREFIX).unwrap_or(defaults.mcp_prefix),
        };

        // Fail at startup rather than at bind time
        config.socket_addr()?;
        Ok(config)
    }

    /// Address to bind
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| AppError::invalid_config(ENV_HOST, &raw, e))
    }
}

fn parse_value<T>(name: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| AppError::invalid_config(name, value, e))
}
