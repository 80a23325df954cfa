pub use crate::Error;
pub use crate::locale::Locale;

// Route geometry and display types
pub use crate::model::{
    Coordinate, HazardSeverity, Polyline, RouteFilter, RouteStep, RouteSummary, TransportMode,
};

// Step synthesis
pub use crate::routing::{
    StepInput, StepSynthesizer, format_distance, format_duration, haversine_distance,
    initial_bearing, route_to_geojson, synthesize,
};

// Backend access
pub use crate::request::{
    HttpRouteProvider, PlannedRoute, RoutePlanner, RouteProvider, RouteQuery, mock_route,
};
