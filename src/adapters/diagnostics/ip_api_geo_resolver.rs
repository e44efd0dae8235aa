//! IP-API Geolocation Adapter
//!
//! Geolocates route hops in one POST to the ip-api.com batch endpoint.
//! Entries the service cannot place (failed lookups, or the 0,0 null
//! island it returns for some ranges) are skipped rather than reported.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::diagnostics::GeoPoint;
use crate::ports::{DiagnosticsError, GeoResolver};

const DEFAULT_BASE_URL: &str = "http://ip-api.com";

/// Batch geolocation via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpApiGeoResolver {
    client: Client,
    base_url: String,
}

impl IpApiGeoResolver {
    /// Creates a resolver against the public ip-api.com service.
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Creates a resolver against a custom endpoint, for tests.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GeoResolver for IpApiGeoResolver {
    async fn locate(&self, ips: &[String]) -> Result<Vec<GeoPoint>, DiagnosticsError> {
        if ips.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(format!("{}/batch", self.base_url))
            .json(&ips)
            .send()
            .await
            .map_err(|e| DiagnosticsError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiagnosticsError::upstream(status.as_u16(), body));
        }

        let entries: Vec<BatchEntry> = response
            .json()
            .await
            .map_err(|e| DiagnosticsError::parse(format!("failed to parse response: {}", e)))?;

        let points = to_geo_points(&entries);
        debug!(requested = ips.len(), located = points.len(), "geolocated hops");
        Ok(points)
    }
}

/// Converts batch entries to hops, numbering from 1 in input order.
fn to_geo_points(entries: &[BatchEntry]) -> Vec<GeoPoint> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.status == "success")
        .filter_map(|(idx, entry)| {
            let lat = entry.lat?;
            let lon = entry.lon?;
            if lat == 0.0 && lon == 0.0 {
                return None;
            }
            Some(GeoPoint {
                hop: (idx + 1) as u32,
                ip: entry.query.clone().unwrap_or_default(),
                lat,
                lon,
                city: entry.city.clone().unwrap_or_default(),
                country: entry.country.clone().unwrap_or_default(),
                rtt: "-".to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct BatchEntry {
    status: String,
    query: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
}
