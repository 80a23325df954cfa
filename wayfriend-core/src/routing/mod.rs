//! Route-step synthesis and the geometry it rests on.

pub mod format;
pub mod geodesy;
pub mod itinerary;
pub mod synthesis;

pub use format::{format_distance, format_duration, travel_minutes};
pub use geodesy::{CompassSector, EARTH_RADIUS_M, haversine_distance, initial_bearing};
pub use itinerary::{route_to_geojson, route_to_geojson_string};
pub use synthesis::{FORWARD_ICON, MAX_STEPS, StepInput, StepSynthesizer, synthesize};
