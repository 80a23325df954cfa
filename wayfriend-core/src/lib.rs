//! Turns routed polylines into short, human-readable walking and
//! wheelchair directions.
//!
//! The heart of the crate is [`StepSynthesizer`], which resamples a route
//! into at most [`MAX_STEPS`] steps with compass-based instructions,
//! formatted distances and travel times, and a hazard warning on the middle
//! step. The [`request`] module wraps it with a client for the routing
//! backend and a canned fallback route.

pub mod error;
pub mod locale;
pub mod model;
pub mod prelude;
pub mod request;
pub mod routing;

pub use error::Error;
pub use locale::Locale;
pub use model::{
    Coordinate, HazardSeverity, Polyline, RouteFilter, RouteStep, RouteSummary, StepSpan,
    TransportMode,
};
pub use routing::{MAX_STEPS, StepSynthesizer, synthesize};
