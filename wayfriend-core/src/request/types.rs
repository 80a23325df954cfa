//! Wire types exchanged with the obstacle-aware routing backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, Polyline, RouteFilter, TransportMode};

/// Search radius around the path used by the backend when matching
/// obstacles, in metres.
pub const DEFAULT_RADIUS_M: f64 = 3.0;

fn default_radius() -> f64 {
    DEFAULT_RADIUS_M
}

/// Cost the backend adds per obstacle category. A `BTreeMap` keeps the
/// request body byte-stable.
pub fn default_penalties() -> BTreeMap<String, f64> {
    [
        ("curb", 1000.0),
        ("bollard", 300.0),
        ("crosswalk", 150.0),
        ("slope", 500.0),
        ("stairs", 3000.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Body of the backend's route search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    #[serde(default)]
    pub avoid_types: Vec<String>,
    #[serde(default = "default_radius")]
    pub radius_m: f64,
    #[serde(default = "default_penalties")]
    pub penalties: BTreeMap<String, f64>,
}

impl RouteRequest {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start_lat: start.lat,
            start_lng: start.lng,
            end_lat: end.lat,
            end_lng: end.lng,
            avoid_types: Vec::new(),
            radius_m: DEFAULT_RADIUS_M,
            penalties: default_penalties(),
        }
    }
}

/// Result of the backend's route search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Polyline,
    #[serde(default)]
    pub distance_m: f64,
    /// Obstacle categories still present along the returned path.
    #[serde(default)]
    pub risk_factors: Vec<String>,
    /// Obstacle categories the backend managed to route around.
    #[serde(default)]
    pub avoided_final: Vec<String>,
}

/// A named location picked in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: String,
}

impl Place {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// What the user asked for: endpoints plus travel preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    #[serde(rename = "startLocation")]
    pub start: Place,
    #[serde(rename = "endLocation")]
    pub end: Place,
    #[serde(default)]
    pub mode: TransportMode,
    #[serde(default)]
    pub filter: RouteFilter,
    #[serde(rename = "avoidObstacles", default)]
    pub avoid: Vec<String>,
}

impl RouteQuery {
    pub fn new(start: Place, end: Place) -> Self {
        Self {
            start,
            end,
            mode: TransportMode::default(),
            filter: RouteFilter::default(),
            avoid: Vec::new(),
        }
    }

    /// Backend request for this query. The `no-stairs` filter always asks the
    /// backend to avoid stairs; avoid types are listed once each.
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(self.start.coordinate(), self.end.coordinate());

        let extra = (self.filter == RouteFilter::NoStairs).then_some("stairs");
        for kind in self.avoid.iter().map(String::as_str).chain(extra) {
            let kind = kind.trim();
            if !kind.is_empty() && !request.avoid_types.iter().any(|k| k == kind) {
                request.avoid_types.push(kind.to_string());
            }
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> RouteQuery {
        RouteQuery::new(
            Place::new(37.5665, 126.978, "서울시청"),
            Place::new(37.57, 126.99, "종로"),
        )
    }

    #[test]
    fn request_carries_defaults() {
        let request = query().to_request();
        assert_eq!(request.start_lat, 37.5665);
        assert_eq!(request.end_lng, 126.99);
        assert_eq!(request.radius_m, 3.0);
        assert_eq!(request.penalties["stairs"], 3000.0);
        assert_eq!(request.penalties.len(), 5);
        assert!(request.avoid_types.is_empty());
    }

    #[test]
    fn no_stairs_filter_adds_stairs_once() {
        let mut q = query();
        q.filter = RouteFilter::NoStairs;
        q.avoid = vec!["curb".into(), "stairs".into(), "curb".into()];
        assert_eq!(q.to_request().avoid_types, vec!["curb", "stairs"]);
    }

    #[test]
    fn response_optional_fields_default() {
        let resp: RouteResponse =
            serde_json::from_str(r#"{"route": [[37.0, 127.0], [37.1, 127.1]]}"#).unwrap();
        assert_eq!(resp.route.len(), 2);
        assert_eq!(resp.distance_m, 0.0);
        assert!(resp.risk_factors.is_empty());
        assert!(resp.avoided_final.is_empty());
    }

    #[test]
    fn query_uses_frontend_field_names() {
        let q: RouteQuery = serde_json::from_str(
            r#"{
                "startLocation": {"lat": 37.5, "lng": 127.0, "name": "A"},
                "endLocation": {"lat": 37.6, "lng": 127.1, "name": "B"},
                "mode": "wheelchair",
                "filter": "no-stairs",
                "avoidObstacles": ["curb"]
            }"#,
        )
        .unwrap();
        assert_eq!(q.mode, TransportMode::Wheelchair);
        assert_eq!(q.filter, RouteFilter::NoStairs);
        assert_eq!(q.avoid, vec!["curb"]);
    }
}
