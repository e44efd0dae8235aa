//! Network diagnostics configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the diagnostics dashboard endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    /// Monitored services, comma-separated `name@host:port` entries.
    /// Falls back to a built-in set of public resolvers when unset.
    pub services: Option<String>,

    /// TCP probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Route trace and geolocation request timeout in seconds.
    /// Traces walk the full path, so this is much longer than the probe timeout.
    #[serde(default = "default_trace_timeout")]
    pub trace_timeout_secs: u64,

    /// Latency above which a reachable service is reported degraded
    #[serde(default = "default_degraded_threshold")]
    pub degraded_threshold_ms: u64,
}

/// A service probed by the dashboard status endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredService {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl DiagnosticsConfig {
    /// Get probe timeout as Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Get trace timeout as Duration
    pub fn trace_timeout(&self) -> Duration {
        Duration::from_secs(self.trace_timeout_secs)
    }

    /// Parse the monitored service list, skipping malformed entries
    pub fn services_list(&self) -> Vec<MonitoredService> {
        match &self.services {
            Some(raw) => raw.split(',').filter_map(parse_service).collect(),
            None => default_services(),
        }
    }

    /// Validate diagnostics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.probe_timeout_secs == 0 || self.probe_timeout_secs > 60 {
            return Err(ValidationError::InvalidProbeTimeout);
        }
        if self.trace_timeout_secs == 0 || self.trace_timeout_secs > 120 {
            return Err(ValidationError::InvalidTraceTimeout);
        }
        Ok(())
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            services: None,
            probe_timeout_secs: default_probe_timeout(),
            trace_timeout_secs: default_trace_timeout(),
            degraded_threshold_ms: default_degraded_threshold(),
        }
    }
}

fn parse_service(entry: &str) -> Option<MonitoredService> {
    let (name, addr) = entry.trim().split_once('@')?;
    let (host, port) = addr.rsplit_once(':')?;
    let port = port.parse().ok()?;
    Some(MonitoredService {
        name: name.trim().to_string(),
        host: host.trim().to_string(),
        port,
    })
}

fn default_services() -> Vec<MonitoredService> {
    vec![
        MonitoredService {
            name: "Google DNS".to_string(),
            host: "8.8.8.8".to_string(),
            port: 53,
        },
        MonitoredService {
            name: "Cloudflare DNS".to_string(),
            host: "1.1.1.1".to_string(),
            port: 53,
        },
        MonitoredService {
            name: "Quad9 DNS".to_string(),
            host: "9.9.9.9".to_string(),
            port: 53,
        },
    ]
}

fn default_probe_timeout() -> u64 {
    2
}

fn default_trace_timeout() -> u64 {
    30
}

fn default_degraded_threshold() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.probe_timeout(), Duration::from_secs(2));
        assert_eq!(config.trace_timeout(), Duration::from_secs(30));
        assert_eq!(config.degraded_threshold_ms, 100);
        assert_eq!(config.services_list().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_services_parsing() {
        let config = DiagnosticsConfig {
            services: Some("Gateway@10.0.0.1:443, DNS@8.8.4.4:53".to_string()),
            ..Default::default()
        };
        let services = config.services_list();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "Gateway");
        assert_eq!(services[0].host, "10.0.0.1");
        assert_eq!(services[0].port, 443);
        assert_eq!(services[1].name, "DNS");
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let config = DiagnosticsConfig {
            services: Some("no-separator, DNS@8.8.4.4:53, Bad@host:notaport".to_string()),
            ..Default::default()
        };
        let services = config.services_list();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "DNS");
    }

    #[test]
    fn test_zero_probe_timeout_rejected() {
        let config = DiagnosticsConfig {
            probe_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
