//! Map-facing export of synthesised routes.

mod to_geojson;

pub use to_geojson::{route_to_geojson, route_to_geojson_string};
