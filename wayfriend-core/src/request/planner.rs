//! Ties a route provider to the step synthesiser.
//!
//! The planner never fails: when the backend is unreachable or returns
//! something unusable, the canned [`mock_route`] is substituted and the
//! reason is recorded in [`RouteSource::Fallback`].

use serde::Serialize;

use super::{
    mock::mock_route,
    provider::RouteProvider,
    types::{Place, RouteQuery, RouteResponse},
};
use crate::{
    Error,
    locale::Locale,
    model::{Polyline, RouteSummary},
    routing::StepSynthesizer,
};

/// Where a planned route came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteSource {
    Backend,
    Fallback { reason: String },
}

impl RouteSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RouteSource::Fallback { .. })
    }
}

/// A route ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRoute {
    #[serde(flatten)]
    pub summary: RouteSummary,
    pub start_location: Place,
    pub end_location: Place,
    pub source: RouteSource,
    /// Backend path; empty for a fallback route.
    #[serde(rename = "route", skip_serializing_if = "Polyline::is_empty")]
    pub polyline: Polyline,
    pub risk_factors: Vec<String>,
    #[serde(rename = "avoided")]
    pub avoided_final: Vec<String>,
}

pub struct RoutePlanner<P> {
    provider: P,
    synthesizer: StepSynthesizer,
}

impl<P: RouteProvider> RoutePlanner<P> {
    pub fn new(provider: P, locale: Locale) -> Self {
        Self {
            provider,
            synthesizer: StepSynthesizer::new(locale),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Plans `query`, falling back to the canned route on any failure.
    pub async fn plan(&self, query: &RouteQuery) -> PlannedRoute {
        let request = query.to_request();
        let outcome = match self.provider.find_route(&request).await {
            Ok(response) => self.from_response(query, response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(route) => {
                log::info!(
                    "Planned {} route {} -> {} with {} steps",
                    query.mode,
                    query.start.name,
                    query.end.name,
                    route.summary.steps.len()
                );
                route
            }
            Err(e) => {
                log::warn!("Route request failed, substituting mock route: {e}");
                Self::fallback(query, &e)
            }
        }
    }

    fn from_response(&self, query: &RouteQuery, response: RouteResponse) -> Result<PlannedRoute, Error> {
        let summary = self.synthesizer.synthesize(
            &response.route,
            response.distance_m,
            query.mode,
            &response.risk_factors,
        )?;

        Ok(PlannedRoute {
            summary,
            start_location: query.start.clone(),
            end_location: query.end.clone(),
            source: RouteSource::Backend,
            polyline: response.route,
            risk_factors: response.risk_factors,
            avoided_final: response.avoided_final,
        })
    }

    fn fallback(query: &RouteQuery, error: &Error) -> PlannedRoute {
        PlannedRoute {
            summary: mock_route(query.mode, query.filter),
            start_location: query.start.clone(),
            end_location: query.end.clone(),
            source: RouteSource::Fallback {
                reason: error.to_string(),
            },
            polyline: Polyline::default(),
            risk_factors: Vec::new(),
            avoided_final: Vec::new(),
        }
    }
}
