use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{
    Error,
    model::{Polyline, RouteStep, RouteSummary, StepSpan},
};

/// Converts synthesised steps to a `GeoJSON` `FeatureCollection`, one
/// feature per step that knows its polyline span. Canned steps without a
/// span are skipped.
pub fn route_to_geojson(
    polyline: &Polyline,
    summary: &RouteSummary,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(summary.steps.len());

    for (idx, step) in summary.steps.iter().enumerate() {
        if let Some(span) = step.span {
            features.push(create_step_feature(polyline, idx, step, span)?);
        }
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn route_to_geojson_string(polyline: &Polyline, summary: &RouteSummary) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(polyline, summary)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_step_feature(
    polyline: &Polyline,
    step_idx: usize,
    step: &RouteStep,
    span: StepSpan,
) -> Result<Feature, Error> {
    let geometry = span_geometry(polyline, span)?;

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "step_index": step_idx,
            "instruction": step.instruction,
            "distance": step.distance,
            "duration": step.duration,
            "icon": step.direction_icon,
            "warning": step.hazard_warning,
            "warning_type": step.hazard_severity,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn span_geometry(polyline: &Polyline, span: StepSpan) -> Result<Geometry, Error> {
    let points = polyline
        .points()
        .get(span.from..=span.to)
        .filter(|slice| !slice.is_empty())
        .ok_or_else(|| {
            Error::GeoJsonError(format!(
                "step span {}..={} outside polyline of {} points",
                span.from,
                span.to,
                polyline.len()
            ))
        })?;

    if let [single] = points {
        return Ok(Geometry::new(GeoJsonValue::from(&Point::from(*single))));
    }

    let line: LineString<f64> = points.iter().map(|&c| Coord::from(c)).collect();
    Ok(Geometry::new(GeoJsonValue::from(&line)))
}
