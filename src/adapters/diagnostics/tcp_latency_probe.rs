//! TCP Latency Probe Adapter
//!
//! Measures service latency as the wall time of a TCP connect. Works
//! without raw sockets or OS ping, so it runs unprivileged in containers.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::ports::LatencyProbe;

/// Connect-latency probe over plain TCP.
#[derive(Debug, Clone)]
pub struct TcpLatencyProbe {
    timeout: Duration,
}

impl TcpLatencyProbe {
    /// Creates a probe with the given per-connect timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl LatencyProbe for TcpLatencyProbe {
    async fn measure_latency_ms(&self, host: &str, port: u16) -> Option<f64> {
        let started = Instant::now();

        match timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                Some((elapsed_ms * 100.0).round() / 100.0)
            }
            Ok(Err(e)) => {
                debug!(host, port, error = %e, "probe connect failed");
                None
            }
            Err(_) => {
                debug!(host, port, timeout_ms = self.timeout.as_millis() as u64, "probe timed out");
                None
            }
        }
    }
}
