//! HTTP listener settings: bind address, environment, logging and CORS.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Upper bound for the per-request timeout; streaming routes are exempt
/// from the timeout layer entirely.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface the listener binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for the HTTP listener
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment; production tightens CORS
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// `tracing` filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for non-streaming requests, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated allowed CORS origins; unset means permissive
    pub cors_origins: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Resolve the host/port pair into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ValidationError::InvalidBindAddress)
    }

    /// True when the configured environment is production.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Split the configured CORS origins on commas, dropping blanks.
    pub fn cors_origins_list(&self) -> Vec<String> {
        match &self.cors_origins {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Semantic checks applied after deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,netmind=debug".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
