//! Geolocated route hops.

use serde::{Deserialize, Serialize};

/// One geolocated hop on the traced route.
///
/// `rtt` is a display placeholder carried for wire compatibility with
/// the dashboard frontend; per-hop timing is not measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub hop: u32,
    pub ip: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub country: String,
    pub rtt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_serializes_all_fields() {
        let point = GeoPoint {
            hop: 1,
            ip: "203.0.113.7".to_string(),
            lat: 40.4,
            lon: -3.7,
            city: "Madrid".to_string(),
            country: "Spain".to_string(),
            rtt: "-".to_string(),
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["hop"], 1);
        assert_eq!(value["ip"], "203.0.113.7");
        assert_eq!(value["city"], "Madrid");
        assert_eq!(value["rtt"], "-");
    }
}
