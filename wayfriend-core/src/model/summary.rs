//! Synthesised instructions as handed to the presentation layer.
//!
//! Field names on the wire follow the route finder frontend
//! (`icon`, `warning`, `warningType`, `totalDistance`, ...).

use serde::{Deserialize, Serialize};

/// Severity of a hazard annotation on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardSeverity {
    Caution,
    Danger,
}

/// Inclusive range of polyline indices covered by a synthesised step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpan {
    pub from: usize,
    pub to: usize,
}

/// One navigation instruction.
///
/// Distance and duration are preformatted approximations of the sub-segment
/// between two resampled polyline points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
    #[serde(rename = "icon")]
    pub direction_icon: String,
    #[serde(rename = "warning", default, skip_serializing_if = "Option::is_none")]
    pub hazard_warning: Option<String>,
    #[serde(rename = "warningType", default, skip_serializing_if = "Option::is_none")]
    pub hazard_severity: Option<HazardSeverity>,
    /// Polyline slice this step was derived from. `None` for canned steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<StepSpan>,
}

impl RouteStep {
    pub fn new(
        instruction: impl Into<String>,
        distance: impl Into<String>,
        duration: impl Into<String>,
        direction_icon: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            distance: distance.into(),
            duration: duration.into(),
            direction_icon: direction_icon.into(),
            hazard_warning: None,
            hazard_severity: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, from: usize, to: usize) -> Self {
        self.span = Some(StepSpan { from, to });
        self
    }

    #[must_use]
    pub fn with_warning(mut self, text: impl Into<String>, severity: HazardSeverity) -> Self {
        self.warn(text, severity);
        self
    }

    pub fn warn(&mut self, text: impl Into<String>, severity: HazardSeverity) {
        self.hazard_warning = Some(text.into());
        self.hazard_severity = Some(severity);
    }

    #[inline]
    pub fn has_warning(&self) -> bool {
        self.hazard_warning.is_some()
    }
}

/// Totals plus the ordered steps of one computed route.
///
/// Built once per route computation and replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_distance: String,
    pub total_duration: String,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Steps that carry a hazard annotation, with their position.
    pub fn warnings(&self) -> impl Iterator<Item = (usize, &RouteStep)> {
        self.steps.iter().enumerate().filter(|(_, s)| s.has_warning())
    }
}
