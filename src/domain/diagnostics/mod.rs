//! Network diagnostics domain module.
//!
//! Pure classification and value types behind the dashboard endpoints;
//! probing and lookups live in adapters.

mod geo;
mod health;

pub use geo::GeoPoint;
pub use health::{DashboardReport, ServiceHealth, ServiceStatus, UNREACHABLE_PENALTY_MS};
