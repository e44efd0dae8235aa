//! Service health classification for the dashboard.

use serde::{Deserialize, Serialize};

/// Latency reported for services that did not answer the probe.
pub const UNREACHABLE_PENALTY_MS: f64 = 999.0;

/// Probe outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Operational,
    Degraded,
    Down,
}

/// Health snapshot of one monitored service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub name: String,
    pub status: ServiceStatus,
    pub latency_ms: f64,
    pub uptime_percentage: f64,
}

impl ServiceHealth {
    /// Classifies a probe result.
    ///
    /// A measured latency below `degraded_threshold_ms` is operational,
    /// at or above it degraded. A missing measurement is down and is
    /// reported with the fixed penalty latency so averages reflect the
    /// outage.
    pub fn from_probe(
        name: impl Into<String>,
        latency_ms: Option<f64>,
        degraded_threshold_ms: f64,
    ) -> Self {
        let (status, latency_ms) = match latency_ms {
            Some(latency) if latency < degraded_threshold_ms => {
                (ServiceStatus::Operational, latency)
            }
            Some(latency) => (ServiceStatus::Degraded, latency),
            None => (ServiceStatus::Down, UNREACHABLE_PENALTY_MS),
        };

        Self {
            name: name.into(),
            status,
            latency_ms,
            uptime_percentage: if status == ServiceStatus::Down { 0.0 } else { 99.9 },
        }
    }
}

/// Aggregated dashboard view over all monitored services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub active_incidents: usize,
    pub avg_latency: f64,
    pub services: Vec<ServiceHealth>,
}

impl DashboardReport {
    /// Summarizes individual service health into the dashboard shape.
    ///
    /// Incidents count every service that is not operational. The
    /// average includes penalty latencies so outages move the graph.
    pub fn summarize(services: Vec<ServiceHealth>) -> Self {
        let active_incidents = services
            .iter()
            .filter(|s| s.status != ServiceStatus::Operational)
            .count();

        let avg_latency = if services.is_empty() {
            0.0
        } else {
            let total: f64 = services.iter().map(|s| s.latency_ms).sum();
            (total / services.len() as f64 * 100.0).round() / 100.0
        };

        Self {
            active_incidents,
            avg_latency,
            services,
        }
    }
}
