//! HTTP DTOs for network diagnostics endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostics::{DashboardReport, GeoPoint, ServiceHealth};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for the geo-trace endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoTraceQuery {
    /// Hostname or IPv4 address to trace toward.
    pub target: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Dashboard status over all monitored services.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatusResponse {
    pub active_incidents: usize,
    pub avg_latency: f64,
    pub services: Vec<ServiceHealth>,
}

impl DashboardStatusResponse {
    pub fn from_report(report: DashboardReport) -> Self {
        Self {
            active_incidents: report.active_incidents,
            avg_latency: report.avg_latency,
            services: report.services,
        }
    }
}

/// Geolocated route toward a target.
#[derive(Debug, Clone, Serialize)]
pub struct GeoTraceResponse {
    pub target: String,
    pub hops: Vec<GeoPoint>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_response_mirrors_report() {
        let report = DashboardReport::summarize(vec![
            ServiceHealth::from_probe("DNS", Some(12.0), 100.0),
            ServiceHealth::from_probe("Gateway", None, 100.0),
        ]);
        let response = DashboardStatusResponse::from_report(report);

        assert_eq!(response.active_incidents, 1);
        assert_eq!(response.services.len(), 2);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["services"][0]["name"], "DNS");
        assert_eq!(value["services"][0]["status"], "operational");
        assert_eq!(value["services"][1]["status"], "down");
    }

    #[test]
    fn geo_trace_response_serializes_hops() {
        let response = GeoTraceResponse {
            target: "example.com".to_string(),
            hops: vec![GeoPoint {
                hop: 1,
                ip: "81.46.16.149".to_string(),
                lat: 40.4,
                lon: -3.7,
                city: "Madrid".to_string(),
                country: "Spain".to_string(),
                rtt: "-".to_string(),
            }],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["target"], "example.com");
        assert_eq!(value["hops"][0]["hop"], 1);
        assert_eq!(value["hops"][0]["rtt"], "-");
    }
}
