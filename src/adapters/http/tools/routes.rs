//! Axum router configuration for network diagnostics endpoints.

use axum::{routing::get, Router};

use super::handlers::{dashboard_status, geo_trace, ToolsAppState};

/// Create the tools API router.
///
/// # Routes
///
/// - `GET /dashboard/status` - Probe all monitored services
/// - `GET /geo-trace?target=...` - Trace and geolocate a route
pub fn tools_routes() -> Router<ToolsAppState> {
    Router::new()
        .route("/dashboard/status", get(dashboard_status))
        .route("/geo-trace", get(geo_trace))
}

/// Create the complete tools module router.
///
/// Suitable for mounting at `/api/tools`.
pub fn tools_router() -> Router<ToolsAppState> {
    tools_routes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = tools_routes();
    }
}
