//! Diagnostics Ports - Interfaces for network probing and lookups.
//!
//! Three small ports back the dashboard endpoints: connect-latency
//! probing, route tracing, and batch IP geolocation. None of them use
//! OS ping or traceroute; adapters work over plain TCP connects and
//! public HTTP APIs.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::diagnostics::GeoPoint;

/// Port for measuring connect latency to a service.
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    /// Measures the time to establish a connection, in milliseconds.
    /// Returns `None` when the service cannot be reached within the
    /// probe timeout.
    async fn measure_latency_ms(&self, host: &str, port: u16) -> Option<f64>;
}

/// Port for resolving the route toward a host.
#[async_trait]
pub trait RouteTracer: Send + Sync {
    /// Ordered public hop IPs toward `host`: the trace source first,
    /// the resolved target last, duplicates and non-public addresses
    /// removed.
    async fn public_route(&self, host: &str) -> Result<Vec<String>, DiagnosticsError>;
}

/// Port for geolocating IP addresses.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Geolocates `ips` in one batch, preserving order. Entries that
    /// cannot be located are skipped, not errors.
    async fn locate(&self, ips: &[String]) -> Result<Vec<GeoPoint>, DiagnosticsError>;
}

/// Diagnostics errors.
#[derive(Debug, Clone, Error)]
pub enum DiagnosticsError {
    /// Network error while reaching a diagnostic source.
    #[error("network error: {0}")]
    Network(String),

    /// A diagnostic source answered with a failure status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Failed to parse a diagnostic source response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl DiagnosticsError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an upstream failure.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
