//! HTTP Route Tracer Adapter
//!
//! Resolves the public route toward a host via the hackertarget MTR API.
//! The raw trace output is scanned for public IPv4 addresses; private,
//! shared (CGNAT), and otherwise non-routable hops are dropped, and the
//! resolved target address is appended as the final hop.

use async_trait::async_trait;
use reqwest::Client;
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::debug;

use crate::ports::{DiagnosticsError, RouteTracer};

const DEFAULT_BASE_URL: &str = "https://api.hackertarget.com";

/// Route tracer backed by the hackertarget MTR endpoint.
#[derive(Debug, Clone)]
pub struct HttpRouteTracer {
    client: Client,
    base_url: String,
}

impl HttpRouteTracer {
    /// Creates a tracer against the public hackertarget API.
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Creates a tracer against a custom endpoint, for tests.
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

    async fn fetch_trace(&self, host: &str) -> Result<String, DiagnosticsError> {
        let url = format!("{}/mtr/?q={}", self.base_url, host);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DiagnosticsError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DiagnosticsError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(DiagnosticsError::upstream(status.as_u16(), body));
        }
        // The API reports its own failures as 200 text bodies.
        if body.starts_with("error") || body.contains("API count exceeded") {
            return Err(DiagnosticsError::upstream(200, body.trim().to_string()));
        }

        Ok(body)
    }
}

#[async_trait]
impl RouteTracer for HttpRouteTracer {
    async fn public_route(&self, host: &str) -> Result<Vec<String>, DiagnosticsError> {
        let trace = self.fetch_trace(host).await?;
        let mut hops = extract_public_ips(&trace);

        // Append the resolved target so the route always ends at the
        // destination, even when the trace dies early.
        if let Some(target) = resolve_ipv4(host).await {
            let target = target.to_string();
            hops.retain(|hop| hop != &target);
            hops.push(target);
        }

        debug!(host, hop_count = hops.len(), "traced public route");
        Ok(hops)
    }
}

async fn resolve_ipv4(host: &str) -> Option<Ipv4Addr> {
    // Already an address: no DNS round trip needed.
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Some(addr);
    }

    let addrs = lookup_host((host, 0)).await.ok()?;
    addrs.filter_map(|a| match a.ip() {
        std::net::IpAddr::V4(v4) => Some(v4),
        std::net::IpAddr::V6(_) => None,
    })
    .next()
}

/// Scans MTR text output for public IPv4 hops, preserving first-seen order.
fn extract_public_ips(trace: &str) -> Vec<String> {
    let mut seen = Vec::new();

    for line in trace.lines() {
        for token in line.split_whitespace() {
            let candidate = token.trim_matches(|c: char| !c.is_ascii_digit() && c != '.');
            let Ok(addr) = candidate.parse::<Ipv4Addr>() else {
                continue;
            };
            if !is_public(addr) {
                continue;
            }
            let ip = addr.to_string();
            if !seen.contains(&ip) {
                seen.push(ip);
            }
        }
    }

    seen
}

fn is_public(addr: Ipv4Addr) -> bool {
    // 100.64.0.0/10 is carrier-grade NAT; Ipv4Addr has no stable
    // classifier for it.
    let octets = addr.octets();
    let is_shared = octets[0] == 100 && (octets[1] & 0b1100_0000) == 0b0100_0000;

    !(addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_broadcast()
        || addr.is_documentation()
        || addr.is_multicast()
        || addr.is_unspecified()
        || is_shared)
}
