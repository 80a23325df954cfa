//! Travel options chosen by the user for a single route.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How the traveller moves. Selects the assumed speed used for duration
/// estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Walking,
    Wheelchair,
}

impl TransportMode {
    /// Assumed traversal speed in km/h. An approximation, not a measurement.
    #[inline]
    pub fn speed_kmh(self) -> f64 {
        match self {
            TransportMode::Walking => 4.0,
            TransportMode::Wheelchair => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Wheelchair => "wheelchair",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walking" | "walk" => Ok(TransportMode::Walking),
            "wheelchair" => Ok(TransportMode::Wheelchair),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

/// Route preference offered by the route finder UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteFilter {
    #[default]
    Safest,
    NoStairs,
    Recommended,
}

impl RouteFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteFilter::Safest => "safest",
            RouteFilter::NoStairs => "no-stairs",
            RouteFilter::Recommended => "recommended",
        }
    }
}

impl fmt::Display for RouteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "safest" => Ok(RouteFilter::Safest),
            "no-stairs" | "no_stairs" => Ok(RouteFilter::NoStairs),
            "recommended" => Ok(RouteFilter::Recommended),
            other => Err(format!("unknown route filter: {other}")),
        }
    }
}
