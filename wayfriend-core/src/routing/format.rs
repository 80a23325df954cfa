//! Distance and duration text.

use crate::{locale::Locale, model::TransportMode};

/// Clamp to a finite, non-negative distance.
#[inline]
fn sanitize(meters: f64) -> f64 {
    if meters.is_finite() && meters > 0.0 { meters } else { 0.0 }
}

/// Estimated travel time in whole minutes at the mode's assumed speed.
/// Never negative; missing or invalid distances count as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn travel_minutes(distance_m: f64, mode: TransportMode) -> u32 {
    let km = sanitize(distance_m) / 1000.0;
    (km / mode.speed_kmh() * 60.0).round() as u32
}

/// `"<m>m"` below one kilometre, `"<km>km"` with two decimals otherwise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_distance(distance_m: f64) -> String {
    let meters = sanitize(distance_m);
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{}m", rounded as u64)
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

pub fn format_duration(distance_m: f64, mode: TransportMode, locale: Locale) -> String {
    locale.minutes(travel_minutes(distance_m, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_boundary() {
        assert_eq!(format_distance(999.0), "999m");
        assert_eq!(format_distance(1000.0), "1.00km");
        assert_eq!(format_distance(1500.0), "1.50km");
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(141.4), "141m");
    }

    #[test]
    fn invalid_distances_format_as_zero() {
        assert_eq!(format_distance(-5.0), "0m");
        assert_eq!(format_distance(f64::NAN), "0m");
        assert_eq!(travel_minutes(-100.0, TransportMode::Walking), 0);
    }

    #[test]
    fn minutes_per_mode() {
        assert_eq!(travel_minutes(1200.0, TransportMode::Walking), 18);
        assert_eq!(travel_minutes(1200.0, TransportMode::Wheelchair), 24);
        assert_eq!(
            format_duration(1200.0, TransportMode::Walking, Locale::Ko),
            "18분"
        );
    }
}
