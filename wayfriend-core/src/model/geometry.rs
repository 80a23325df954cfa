//! Coordinates and polylines
//!
//! A coordinate travels on the wire as a `[lat, lng]` pair, matching the
//! routing backend's `route` field. Internally `geo` types use `x = lng`,
//! `y = lat`, so conversions swap the order.

use geo::{Coord, LineString, Point};
use serde::{Deserialize, Serialize};

/// A WGS-84 latitude/longitude pair in degrees.
///
/// No range validation is performed; out-of-range values simply produce
/// degenerate distances and bearings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lng, c.lat)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord { x: c.lng, y: c.lat }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Ordered traversal path from origin to destination.
///
/// Order is the direction of travel and is never changed. Consecutive
/// duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline(Vec<Coordinate>);

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    #[inline]
    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.0.first().copied()
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.0.last().copied()
    }

    /// Geometry of the whole path as a `geo` line string.
    pub fn to_line_string(&self) -> LineString<f64> {
        self.0.iter().map(|&c| Coord::from(c)).collect()
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

impl From<Vec<[f64; 2]>> for Polyline {
    fn from(pairs: Vec<[f64; 2]>) -> Self {
        pairs.into_iter().map(Coordinate::from).collect()
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_wire_format_is_lat_lng_pair() {
        let c: Coordinate = serde_json::from_str("[37.5665, 126.978]").unwrap();
        assert_eq!(c, Coordinate::new(37.5665, 126.978));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[37.5665,126.978]");
    }

    #[test]
    fn geo_point_swaps_axes() {
        let p = Point::from(Coordinate::new(37.0, 127.0));
        assert_eq!(p.x(), 127.0);
        assert_eq!(p.y(), 37.0);
    }

    #[test]
    fn polyline_keeps_order_and_duplicates() {
        let line: Polyline = vec![[1.0, 2.0], [1.0, 2.0], [3.0, 4.0]].into();
        assert_eq!(line.len(), 3);
        assert_eq!(line.origin(), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(line.destination(), Some(Coordinate::new(3.0, 4.0)));
        assert_eq!(line.to_line_string().0.len(), 3);
    }
}
