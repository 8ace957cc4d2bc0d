//! Gearing formulas.
//!
//! Engine RPM at road speed:
//!
//! ```text
//! rpm = speed_mph × axle_ratio × trans_ratio × 336 / diameter_in
//! ```
//!
//! `336` is `63360 / (60 × π) ≈ 336.13` rounded by shop convention. The
//! rounding under-reads RPM by about 0.04%.
//!
//! Cruise RPM after a tire change is quoted through the effective ratio:
//! the axle ratio scaled by `current_d / new_d`, run on the new diameter.
//! [`cruise_rpm_on_new_tire`] and [`axle_ratio_for_cruise_rpm`] are the pair
//! every new-tire RPM figure goes through.

/// Conversion constant from mph and tire diameter (in) to wheel RPM.
pub const RPM_CONSTANT: f64 = 336.0;

/// Reference highway speed (mph) for cruise-RPM comparisons.
pub const REFERENCE_SPEED_MPH: f64 = 65.0;

/// Engine speed used to quote crawl speed.
pub const CRAWL_REFERENCE_RPM: f64 = 1_000.0;

/// Engine RPM at `speed_mph`.
pub fn engine_rpm(speed_mph: f64, axle_ratio: f64, trans_ratio: f64, diameter_in: f64) -> f64 {
    speed_mph * axle_ratio * trans_ratio * RPM_CONSTANT / diameter_in
}

/// Road speed (mph) at `rpm` through a total reduction of `overall_ratio`.
pub fn road_speed(rpm: f64, overall_ratio: f64, diameter_in: f64) -> f64 {
    rpm * diameter_in / (overall_ratio * RPM_CONSTANT)
}

/// Axle ratio that produces `target_rpm` at `speed_mph`. Inverse of [`engine_rpm`].
pub fn axle_ratio_for_rpm(target_rpm: f64, speed_mph: f64, trans_ratio: f64, diameter_in: f64) -> f64 {
    target_rpm * diameter_in / (speed_mph * trans_ratio * RPM_CONSTANT)
}

/// Cruise RPM on the new tire for `axle_ratio`, via its effective ratio.
pub fn cruise_rpm_on_new_tire(
    speed_mph: f64,
    axle_ratio: f64,
    trans_ratio: f64,
    current_diameter_in: f64,
    new_diameter_in: f64,
) -> f64 {
    let effective = effective_ratio(axle_ratio, current_diameter_in, new_diameter_in);
    engine_rpm(speed_mph, effective, trans_ratio, new_diameter_in)
}

/// Axle ratio whose new-tire cruise RPM is `target_rpm`. Inverse of [`cruise_rpm_on_new_tire`].
pub fn axle_ratio_for_cruise_rpm(
    target_rpm: f64,
    speed_mph: f64,
    trans_ratio: f64,
    current_diameter_in: f64,
    new_diameter_in: f64,
) -> f64 {
    let effective = axle_ratio_for_rpm(target_rpm, speed_mph, trans_ratio, new_diameter_in);
    restoration_ratio(effective, current_diameter_in, new_diameter_in)
}

/// Axle ratio adjusted for a diameter change: what the axle "feels like" on the new tire.
pub fn effective_ratio(axle_ratio: f64, current_diameter_in: f64, new_diameter_in: f64) -> f64 {
    axle_ratio * (current_diameter_in / new_diameter_in)
}

/// Axle ratio that brings the effective ratio on the new tire back to `axle_ratio`.
pub fn restoration_ratio(axle_ratio: f64, current_diameter_in: f64, new_diameter_in: f64) -> f64 {
    axle_ratio * (new_diameter_in / current_diameter_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rpm_inverse_round_trips() {
        let axle = axle_ratio_for_rpm(2_000.0, 65.0, 0.85, 33.0);
        assert_relative_eq!(engine_rpm(65.0, axle, 0.85, 33.0), 2_000.0, epsilon = 1e-9);
    }

    #[test]
    fn restoration_cancels_effective_change() {
        let restored = restoration_ratio(3.73, 31.0, 35.0);
        assert_relative_eq!(effective_ratio(restored, 31.0, 35.0), 3.73, epsilon = 1e-12);
    }

    #[test]
    fn cruise_rpm_inverse_round_trips() {
        let axle = axle_ratio_for_cruise_rpm(2_300.0, 65.0, 0.85, 31.6, 32.8);
        assert_relative_eq!(cruise_rpm_on_new_tire(65.0, axle, 0.85, 31.6, 32.8), 2_300.0, epsilon = 1e-9);
    }

    #[test]
    fn cruise_rpm_unchanged_tire_matches_engine_rpm() {
        assert_relative_eq!(
            cruise_rpm_on_new_tire(65.0, 3.73, 0.7, 33.0, 33.0),
            engine_rpm(65.0, 3.73, 0.7, 33.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn road_speed_matches_rpm_formula() {
        // Direct drive: road_speed is the inverse of engine_rpm with trans = 1.
        let mph = road_speed(2_500.0, 4.10, 33.0);
        assert_relative_eq!(engine_rpm(mph, 4.10, 1.0, 33.0), 2_500.0, epsilon = 1e-9);
    }
}
