//! HTTP handlers for network diagnostics endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::future::join_all;
use tracing::{error, info};

use crate::config::MonitoredService;
use crate::domain::diagnostics::{DashboardReport, ServiceHealth};
use crate::ports::{GeoResolver, LatencyProbe, RouteTracer};

use super::dto::{DashboardStatusResponse, ErrorResponse, GeoTraceQuery, GeoTraceResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application state for diagnostics endpoints.
#[derive(Clone)]
pub struct ToolsAppState {
    /// Connect-latency probe (injected)
    pub probe: Arc<dyn LatencyProbe>,
    /// Route tracer (injected)
    pub tracer: Arc<dyn RouteTracer>,
    /// Batch geolocation (injected)
    pub geo: Arc<dyn GeoResolver>,
    /// Services probed by the dashboard
    pub services: Vec<MonitoredService>,
    /// Latency above which a reachable service is degraded
    pub degraded_threshold_ms: f64,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/tools/dashboard/status - Probe all monitored services
pub async fn dashboard_status(State(state): State<ToolsAppState>) -> Response {
    // All probes run concurrently; one slow service must not serialize
    // the sweep.
    let probes = state.services.iter().map(|service| {
        let probe = Arc::clone(&state.probe);
        async move {
            let latency = probe.measure_latency_ms(&service.host, service.port).await;
            ServiceHealth::from_probe(&service.name, latency, state.degraded_threshold_ms)
        }
    });
    let services = join_all(probes).await;

    let report = DashboardReport::summarize(services);
    info!(
        incidents = report.active_incidents,
        avg_latency = report.avg_latency,
        "dashboard sweep complete"
    );

    (
        StatusCode::OK,
        Json(DashboardStatusResponse::from_report(report)),
    )
        .into_response()
}

/// GET /api/tools/geo-trace?target=... - Trace and geolocate a route
pub async fn geo_trace(
    State(state): State<ToolsAppState>,
    Query(query): Query<GeoTraceQuery>,
) -> Response {
    let target = query.target.trim().to_string();
    if target.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("target is required")),
        )
            .into_response();
    }

    let hops = match state.tracer.public_route(&target).await {
        Ok(hops) => hops,
        Err(e) => {
            error!(target, error = %e, "route trace failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(format!("trace failed: {}", e))),
            )
                .into_response();
        }
    };

    if hops.len() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "could not trace the target or find public hops",
            )),
        )
            .into_response();
    }

    match state.geo.locate(&hops).await {
        Ok(points) => (
            StatusCode::OK,
            Json(GeoTraceResponse {
                target,
                hops: points,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(target, error = %e, "geolocation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(format!("geolocation failed: {}", e))),
            )
                .into_response()
        }
    }
}
