//! Talking to the obstacle-aware routing backend.
//!
//! [`RoutePlanner`] asks a [`RouteProvider`] for a path and turns the answer
//! into display steps, substituting [`mock_route`] when the backend fails.

mod mock;
mod planner;
mod provider;
mod types;

pub use mock::mock_route;
pub use planner::{PlannedRoute, RoutePlanner, RouteSource};
pub use provider::{DEFAULT_ROUTE_PATH, HttpRouteProvider, RouteProvider, join_url};
pub use types::{
    DEFAULT_RADIUS_M, Place, RouteQuery, RouteRequest, RouteResponse, default_penalties,
};
