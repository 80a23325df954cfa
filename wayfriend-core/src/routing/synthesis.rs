//! Turn a polyline into a short list of turn-by-turn steps.
//!
//! The polyline is resampled into at most [`MAX_STEPS`] evenly strided
//! segments. Each segment becomes one step whose direction comes from the
//! bearing between its endpoints, quantised to eight compass sectors.
//! Hazards reported for the whole route are not tied to positions, so a
//! single warning is attached to the middle step.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    locale::Locale,
    model::{Coordinate, HazardSeverity, Polyline, RouteStep, RouteSummary, TransportMode},
    routing::{
        format::{format_distance, format_duration},
        geodesy::{CompassSector, haversine_distance, initial_bearing},
    },
};

/// Upper bound on the number of synthesised steps, whatever the polyline
/// density.
pub const MAX_STEPS: usize = 5;

/// Icon of the single whole-trip step.
pub const FORWARD_ICON: &str = "↑";

/// Everything needed for one synthesis call, in owned form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    pub polyline: Polyline,
    #[serde(default)]
    pub total_distance_m: f64,
    #[serde(default)]
    pub mode: TransportMode,
    #[serde(default)]
    pub hazards: Vec<String>,
}

/// Stateless step synthesiser. Holds only the output language, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepSynthesizer {
    locale: Locale,
}

impl StepSynthesizer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Build the route summary for `polyline`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the polyline is empty. Degenerate
    /// geometry (duplicate points, zero-length segments) never fails.
    pub fn synthesize(
        &self,
        polyline: &Polyline,
        total_distance_m: f64,
        mode: TransportMode,
        hazards: &[String],
    ) -> Result<RouteSummary, Error> {
        let points = polyline.points();
        if points.is_empty() {
            return Err(Error::InvalidInput(
                "polyline must contain at least the origin".to_string(),
            ));
        }

        let mut steps = if points.len() < 2 {
            Vec::new()
        } else {
            self.resample(points, mode)
        };

        if steps.is_empty() {
            steps.push(self.whole_trip_step(total_distance_m, mode, points.len()));
        }

        if let Some(warning) = self.locale.hazard_warning(hazards) {
            let mid = steps.len() / 2;
            steps[mid].warn(warning, HazardSeverity::Danger);
        }

        log::debug!(
            "Synthesised {} steps from {} polyline points ({mode})",
            steps.len(),
            points.len()
        );

        Ok(RouteSummary {
            total_distance: format_distance(total_distance_m),
            total_duration: format_duration(total_distance_m, mode, self.locale),
            steps,
        })
    }

    pub fn synthesize_input(&self, input: &StepInput) -> Result<RouteSummary, Error> {
        self.synthesize(
            &input.polyline,
            input.total_distance_m,
            input.mode,
            &input.hazards,
        )
    }

    /// Synthesise many independent routes in parallel. Results keep the
    /// order of `inputs`.
    pub fn synthesize_batch(&self, inputs: &[StepInput]) -> Vec<Result<RouteSummary, Error>> {
        inputs
            .par_iter()
            .map(|input| self.synthesize_input(input))
            .collect()
    }

    /// One step per strided segment. Requires at least two points.
    fn resample(&self, points: &[Coordinate], mode: TransportMode) -> Vec<RouteStep> {
        let last = points.len() - 1;
        let step_count = last.min(MAX_STEPS);
        let stride = (last / step_count).max(1);

        (0..step_count)
            .map(|i| {
                let from = i * stride;
                // The final step absorbs the remainder left by the integer
                // stride so the destination is always reached.
                let to = if i + 1 == step_count {
                    last
                } else {
                    (from + stride).min(last)
                };
                self.segment_step(points[from], points[to], mode, i == 0)
                    .with_span(from, to)
            })
            .collect()
    }

    fn segment_step(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
        first: bool,
    ) -> RouteStep {
        let distance = haversine_distance(from, to);
        let sector = CompassSector::from_bearing(initial_bearing(from, to));
        let instruction = if first {
            self.locale.depart(sector)
        } else {
            self.locale.continue_heading(sector)
        };

        RouteStep::new(
            instruction,
            format_distance(distance),
            format_duration(distance, mode, self.locale),
            sector.icon(),
        )
    }

    fn whole_trip_step(&self, total_distance_m: f64, mode: TransportMode, len: usize) -> RouteStep {
        RouteStep::new(
            self.locale.whole_trip(),
            format_distance(total_distance_m),
            format_duration(total_distance_m, mode, self.locale),
            FORWARD_ICON,
        )
        .with_span(0, len.saturating_sub(1))
    }
}

/// Synthesise with the default (Korean) phrasing.
///
/// # Errors
///
/// See [`StepSynthesizer::synthesize`].
pub fn synthesize(
    polyline: &Polyline,
    total_distance_m: f64,
    mode: TransportMode,
    hazards: &[String],
) -> Result<RouteSummary, Error> {
    StepSynthesizer::default().synthesize(polyline, total_distance_m, mode, hazards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> Polyline {
        vec![[37.5665, 126.9780], [37.5675, 126.9790], [37.5685, 126.9800]].into()
    }

    fn dense(n: usize) -> Polyline {
        (0..n)
            .map(|i| Coordinate::new(37.0 + i as f64 * 0.0005, 127.0 + (i % 3) as f64 * 0.0003))
            .collect()
    }

    fn east_line(n: usize) -> Polyline {
        (0..n).map(|i| Coordinate::new(37.5, 127.0 + i as f64 * 0.001)).collect()
    }

    fn hazards(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn seoul_example() {
        let summary = synthesize(&seoul(), 1200.0, TransportMode::Walking, &[]).unwrap();
        assert_eq!(summary.steps.len(), 2);
        assert_eq!(summary.total_distance, "1.20km");
        assert_eq!(summary.total_duration, "18분");
        assert_eq!(summary.warnings().count(), 0);
        for step in &summary.steps {
            assert!(
                step.direction_icon == "↗" || step.direction_icon == "→",
                "unexpected icon {}",
                step.direction_icon
            );
        }
        assert!(summary.steps[0].instruction.ends_with("출발"));
        assert!(summary.steps[1].instruction.ends_with("계속 이동"));
        assert_eq!(summary.steps[0].span.map(|s| (s.from, s.to)), Some((0, 1)));
        assert_eq!(summary.steps[1].span.map(|s| (s.from, s.to)), Some((1, 2)));
    }

    #[test]
    fn never_empty_and_capped() {
        for n in 1..40 {
            let summary = synthesize(&dense(n), 500.0, TransportMode::Walking, &[]).unwrap();
            assert!(!summary.steps.is_empty(), "n = {n}");
            assert!(summary.steps.len() <= MAX_STEPS, "n = {n}");
            assert_eq!(summary.steps.len(), (n.max(2) - 1).min(MAX_STEPS), "n = {n}");
        }
    }

    #[test]
    fn last_step_reaches_destination() {
        let line = dense(12);
        let summary = synthesize(&line, 0.0, TransportMode::Walking, &[]).unwrap();
        assert_eq!(summary.steps.len(), 5);
        let last = summary.steps.last().and_then(|s| s.span).unwrap();
        assert_eq!(last.to, 11);
        let first = summary.steps[0].span.unwrap();
        assert_eq!((first.from, first.to), (0, 2));
    }

    #[test]
    fn single_point_uses_total_distance() {
        let line: Polyline = vec![[37.0, 127.0]].into();
        let summary = synthesize(&line, 1500.0, TransportMode::Walking, &[]).unwrap();
        assert_eq!(summary.steps.len(), 1);
        let step = &summary.steps[0];
        assert_eq!(step.instruction, "출발지에서 목적지까지 이동");
        assert_eq!(step.distance, "1.50km");
        assert_eq!(step.duration, "23분");
        assert_eq!(step.direction_icon, FORWARD_ICON);
    }

    #[test]
    fn empty_polyline_is_rejected() {
        let err = synthesize(&Polyline::default(), 100.0, TransportMode::Walking, &[]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn missing_distance_gives_zero_minutes() {
        let summary = synthesize(&seoul(), 0.0, TransportMode::Wheelchair, &[]).unwrap();
        assert_eq!(summary.total_duration, "0분");
        assert_eq!(summary.total_distance, "0m");
    }

    #[test]
    fn wheelchair_never_faster() {
        let line = dense(9);
        let walk = synthesize(&line, 2300.0, TransportMode::Walking, &[]).unwrap();
        let chair = synthesize(&line, 2300.0, TransportMode::Wheelchair, &[]).unwrap();
        let minutes = |s: &str| s.trim_end_matches('분').parse::<u32>().unwrap();
        assert!(minutes(&chair.total_duration) >= minutes(&walk.total_duration));
        for (w, c) in walk.steps.iter().zip(&chair.steps) {
            assert!(minutes(&c.duration) >= minutes(&w.duration));
        }
    }

    #[test]
    fn due_east_segment() {
        let summary = synthesize(&east_line(2), 88.0, TransportMode::Walking, &[]).unwrap();
        assert_eq!(summary.steps[0].direction_icon, "→");
        assert!(summary.steps[0].instruction.contains("동쪽"));

        let english = StepSynthesizer::new(Locale::En)
            .synthesize(&east_line(3), 176.0, TransportMode::Walking, &[])
            .unwrap();
        assert_eq!(english.steps[0].instruction, "Depart heading east");
        assert_eq!(english.steps[1].instruction, "Continue heading east");
    }

    #[test]
    fn hazard_lands_on_midpoint() {
        for n in [1, 2, 3, 4, 6, 20] {
            let summary =
                synthesize(&dense(n), 900.0, TransportMode::Walking, &hazards(&["stairs"])).unwrap();
            let warned: Vec<usize> = summary.warnings().map(|(i, _)| i).collect();
            assert_eq!(warned, vec![summary.steps.len() / 2], "n = {n}");
            let step = &summary.steps[warned[0]];
            assert_eq!(step.hazard_severity, Some(HazardSeverity::Danger));
            assert_eq!(step.hazard_warning.as_deref(), Some("계단 주의"));
        }
    }

    #[test]
    fn blank_hazards_still_attach_one_warning() {
        for blank in [&[""][..], &["  "][..]] {
            let summary =
                synthesize(&seoul(), 1200.0, TransportMode::Walking, &hazards(blank)).unwrap();
            let warned: Vec<usize> = summary.warnings().map(|(i, _)| i).collect();
            assert_eq!(warned, vec![1]);
            assert_eq!(summary.steps[1].hazard_severity, Some(HazardSeverity::Danger));
            assert_eq!(summary.steps[1].hazard_warning.as_deref(), Some("주의"));
        }
    }

    #[test]
    fn duplicate_points_are_tolerated() {
        let line: Polyline = vec![[37.0, 127.0], [37.0, 127.0], [37.0, 127.0]].into();
        let summary = synthesize(&line, 0.0, TransportMode::Walking, &[]).unwrap();
        assert_eq!(summary.steps.len(), 2);
        for step in &summary.steps {
            assert_eq!(step.distance, "0m");
            assert_eq!(step.direction_icon, "↑");
        }
    }

    #[test]
    fn deterministic_output() {
        let line = dense(17);
        let hz = hazards(&["curb", "slope"]);
        let a = synthesize(&line, 3210.0, TransportMode::Wheelchair, &hz).unwrap();
        let b = synthesize(&line, 3210.0, TransportMode::Wheelchair, &hz).unwrap();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn batch_keeps_input_order() {
        let inputs = vec![
            StepInput {
                polyline: seoul(),
                total_distance_m: 1200.0,
                mode: TransportMode::Walking,
                hazards: vec![],
            },
            StepInput {
                polyline: Polyline::default(),
                total_distance_m: 0.0,
                mode: TransportMode::Walking,
                hazards: vec![],
            },
            StepInput {
                polyline: east_line(2),
                total_distance_m: 88.0,
                mode: TransportMode::Wheelchair,
                hazards: hazards(&["curb"]),
            },
        ];
        let results = StepSynthesizer::default().synthesize_batch(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().total_distance, "1.20km");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().warnings().count(), 1);
    }
}
