//! Canned route shown when the routing backend cannot be reached.
//!
//! The content is fixed product copy, not derived from any geometry, and
//! stays in Korean regardless of locale.

use crate::model::{HazardSeverity, RouteFilter, RouteStep, RouteSummary, TransportMode};

pub fn mock_route(mode: TransportMode, filter: RouteFilter) -> RouteSummary {
    let mut first = RouteStep::new("메인 스트리트를 동쪽으로 직진", "150m", "2분", "→");
    if mode == TransportMode::Wheelchair {
        first.warn("가파른 오르막길 주의", HazardSeverity::Caution);
    }

    let mut second = RouteStep::new("브로드웨이로 좌회전", "400m", "5분", "←");
    if filter == RouteFilter::NoStairs {
        second.warn("계단 구간 회피", HazardSeverity::Caution);
    }

    let third = RouteStep::new("파크 애비뉴로 계속 직진", "500m", "6분", "↑")
        .with_warning("공사 구간, 주의해서 통행", HazardSeverity::Danger);

    let mut steps = vec![first, second, third];
    if filter == RouteFilter::NoStairs {
        for step in steps.iter_mut().filter(|s| !s.has_warning()) {
            step.warn("계단 회피 경로", HazardSeverity::Caution);
        }
    }

    RouteSummary {
        total_distance: "1.2km".to_string(),
        total_duration: "13분".to_string(),
        steps,
    }
}
