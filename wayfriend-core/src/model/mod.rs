//! Data model for route-step synthesis
//!
//! Contains the geographic input types (coordinates, polylines), the travel
//! options (mode, filter) and the presentation-facing output (steps, summary).

pub mod geometry;
pub mod mode;
pub mod summary;

pub use geometry::{Coordinate, Polyline};
pub use mode::{RouteFilter, TransportMode};
pub use summary::{HazardSeverity, RouteStep, RouteSummary, StepSpan};
