//! Great-circle distance and bearing on a spherical Earth.

use crate::model::Coordinate;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in metres.
///
/// Identical points give exactly `0.0`.
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `from` towards `to`, in degrees within `[0, 360)`.
///
/// A zero-length segment has no direction; it is reported as `0.0` (north).
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    if y == 0.0 && x == 0.0 {
        return 0.0;
    }

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative angle up to exactly 360.
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// One of eight 45° compass sectors, each centred on its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassSector {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassSector {
    const ALL: [CompassSector; 8] = [
        CompassSector::North,
        CompassSector::NorthEast,
        CompassSector::East,
        CompassSector::SouthEast,
        CompassSector::South,
        CompassSector::SouthWest,
        CompassSector::West,
        CompassSector::NorthWest,
    ];

    /// Quantise a bearing in degrees. Boundaries sit at 22.5°, 67.5°, ...;
    /// a bearing exactly on a boundary belongs to the clockwise sector.
    pub fn from_bearing(bearing: f64) -> Self {
        // NaN casts to 0, so undefined bearings land on north.
        let index = ((bearing.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % 8;
        Self::ALL[index]
    }

    /// Arrow glyph shown next to the instruction.
    pub fn icon(self) -> &'static str {
        match self {
            CompassSector::North => "↑",
            CompassSector::NorthEast => "↗",
            CompassSector::East => "→",
            CompassSector::SouthEast => "↘",
            CompassSector::South => "↓",
            CompassSector::SouthWest => "↙",
            CompassSector::West => "←",
            CompassSector::NorthWest => "↖",
        }
    }
}
