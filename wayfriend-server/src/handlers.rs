use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use wayfriend_core::{
    Locale, Polyline, RouteSummary, StepSynthesizer, TransportMode,
    request::{PlannedRoute, RouteQuery},
    routing::route_to_geojson,
};

use crate::{AppState, error::ServerError};

/// A backend route plus display preferences. Field names follow the
/// backend's response so it can be posted back unchanged.
#[derive(Debug, Deserialize)]
pub struct StepsRequest {
    pub route: Polyline,
    #[serde(default)]
    pub distance_m: f64,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub mode: TransportMode,
    pub locale: Option<Locale>,
}

impl StepsRequest {
    fn summarize(&self, default_locale: Locale) -> Result<RouteSummary, ServerError> {
        let synthesizer = StepSynthesizer::new(self.locale.unwrap_or(default_locale));
        Ok(synthesizer.synthesize(&self.route, self.distance_m, self.mode, &self.risk_factors)?)
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn steps(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StepsRequest>,
) -> Result<Json<RouteSummary>, ServerError> {
    let summary = request.summarize(state.config.locale)?;
    info!(
        points = request.route.len(),
        steps = summary.steps.len(),
        mode = %request.mode,
        "synthesised route steps"
    );
    Ok(Json(summary))
}

pub async fn geojson(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StepsRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let summary = request.summarize(state.config.locale)?;
    let collection = route_to_geojson(&request.route, &summary)?;
    Ok(Json(collection))
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(query): Json<RouteQuery>,
) -> Json<PlannedRoute> {
    let planned = state.planner.plan(&query).await;
    info!(
        from = %query.start.name,
        to = %query.end.name,
        mode = %query.mode,
        fallback = planned.source.is_fallback(),
        "calculated route"
    );
    Json(planned)
}
