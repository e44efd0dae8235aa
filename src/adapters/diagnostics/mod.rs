//! Network Diagnostics Adapters.
//!
//! Implementations of the LatencyProbe, RouteTracer, and GeoResolver
//! ports. All of them work unprivileged: latency is TCP connect time,
//! and tracing/geolocation go through public HTTP APIs.
//!
//! ## Available Adapters
//!
//! - `TcpLatencyProbe` - Connect-latency measurement over TCP
//! - `HttpRouteTracer` - Public route discovery via hackertarget MTR
//! - `IpApiGeoResolver` - Batch IP geolocation via ip-api.com

mod http_route_tracer;
mod ip_api_geo_resolver;
mod tcp_latency_probe;

pub use http_route_tracer::HttpRouteTracer;
pub use ip_api_geo_resolver::IpApiGeoResolver;
pub use tcp_latency_probe::TcpLatencyProbe;
