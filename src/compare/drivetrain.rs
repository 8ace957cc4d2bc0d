//! Drivetrain impact of a diameter change.
//!
//! - effective ratio: `axle × current_d / new_d` (taller tire → numerically lower)
//! - cruise RPM at 65 mph: `speed × ratio × trans_top × 336 / d`, with the
//!   axle ratio on the current tire and the effective ratio on the new one
//! - high-range top-gear overall ratio: `ratio × trans_top × transfer_high`
//! - crawl ratio: `axle × transfer_low × first_gear`
//!
//! The crawl ratio is a pure gear-train product and does not change with the
//! tire. What changes is crawl *speed*: the same engine RPM moves a taller
//! tire faster over the ground.

use serde::{Deserialize, Serialize};

use crate::domain::DrivetrainConfig;
use crate::math::{
    CRAWL_REFERENCE_RPM, REFERENCE_SPEED_MPH, cruise_rpm_on_new_tire, delta, effective_ratio, engine_rpm,
    restoration_ratio, road_speed,
};

/// A quantity on the current tire vs. the new tire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeforeAfter {
    pub current: f64,
    pub new: f64,
    pub change: f64,
    pub change_percentage: f64,
}

impl BeforeAfter {
    pub fn new(current: f64, new: f64) -> Self {
        let (change, change_percentage) = delta(current, new);
        Self {
            current,
            new,
            change,
            change_percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivetrainImpact {
    pub axle_gear_ratio: f64,
    pub transmission_top_gear_ratio: f64,
    pub effective_gear_ratio: BeforeAfter,
    pub reference_speed_mph: f64,
    pub rpm_at_reference_speed: BeforeAfter,
    /// Top gear through the transfer case in high range, effective on the new tire.
    pub top_gear_overall_ratio: BeforeAfter,
    pub crawl_ratio: BeforeAfter,
    pub crawl_reference_rpm: f64,
    /// Low-range first-gear road speed at [`CRAWL_REFERENCE_RPM`].
    pub crawl_speed_mph: BeforeAfter,
    /// Axle ratio that restores the original effective ratio on the new tire.
    pub restoration_ratio: f64,
}

/// `None` when the config carries no axle ratio. The config must already be validated.
pub fn drivetrain_impact(
    current_diameter_in: f64,
    new_diameter_in: f64,
    config: &DrivetrainConfig,
) -> Option<DrivetrainImpact> {
    let axle = config.axle_gear_ratio?;
    let trans = config.transmission_top_gear_ratio;

    let effective = BeforeAfter::new(axle, effective_ratio(axle, current_diameter_in, new_diameter_in));

    let rpm = BeforeAfter::new(
        engine_rpm(REFERENCE_SPEED_MPH, axle, trans, current_diameter_in),
        cruise_rpm_on_new_tire(REFERENCE_SPEED_MPH, axle, trans, current_diameter_in, new_diameter_in),
    );

    let high = trans * config.transfer_case_high_ratio;
    let top_gear_overall = BeforeAfter::new(effective.current * high, effective.new * high);

    // Same gear train on both sides: diameter never enters this product.
    let crawl = config.crawl_ratio(axle);
    let crawl_ratio = BeforeAfter::new(crawl, crawl);

    let crawl_speed = BeforeAfter::new(
        road_speed(CRAWL_REFERENCE_RPM, crawl, current_diameter_in),
        road_speed(CRAWL_REFERENCE_RPM, crawl, new_diameter_in),
    );

    Some(DrivetrainImpact {
        axle_gear_ratio: axle,
        transmission_top_gear_ratio: trans,
        effective_gear_ratio: effective,
        reference_speed_mph: REFERENCE_SPEED_MPH,
        rpm_at_reference_speed: rpm,
        top_gear_overall_ratio: top_gear_overall,
        crawl_ratio,
        crawl_reference_rpm: CRAWL_REFERENCE_RPM,
        crawl_speed_mph: crawl_speed,
        restoration_ratio: restoration_ratio(axle, current_diameter_in, new_diameter_in),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn none_without_axle_ratio() {
        assert!(drivetrain_impact(31.6, 32.8, &DrivetrainConfig::default()).is_none());
    }

    #[test]
    fn effective_ratio_drops_on_taller_tire() {
        let impact = drivetrain_impact(31.6, 32.8, &DrivetrainConfig::with_axle(3.909)).unwrap();
        assert_abs_diff_eq!(impact.effective_gear_ratio.new, 3.766, epsilon = 0.01);
        assert!(impact.effective_gear_ratio.change < 0.0);
        assert!(impact.rpm_at_reference_speed.change < 0.0);
    }

    #[test]
    fn new_tire_rpm_runs_through_effective_ratio() {
        let cfg = DrivetrainConfig {
            transmission_top_gear_ratio: 0.85,
            ..DrivetrainConfig::with_axle(3.909)
        };
        let impact = drivetrain_impact(31.6, 32.8, &cfg).unwrap();
        let expected = engine_rpm(65.0, impact.effective_gear_ratio.new, 0.85, 32.8);
        assert_abs_diff_eq!(impact.rpm_at_reference_speed.new, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(impact.rpm_at_reference_speed.new, 2131.5, epsilon = 1.0);
    }

    #[test]
    fn transfer_high_scales_top_gear_overall_ratio() {
        let cfg = DrivetrainConfig {
            transmission_top_gear_ratio: 0.8,
            transfer_case_high_ratio: 1.2,
            ..DrivetrainConfig::with_axle(4.0)
        };
        let impact = drivetrain_impact(30.0, 32.0, &cfg).unwrap();
        assert_abs_diff_eq!(impact.top_gear_overall_ratio.current, 4.0 * 0.8 * 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(impact.top_gear_overall_ratio.new, 4.0 * 30.0 / 32.0 * 0.8 * 1.2, epsilon = 1e-12);
        let direct = drivetrain_impact(30.0, 32.0, &DrivetrainConfig::with_axle(4.0)).unwrap();
        assert_eq!(direct.top_gear_overall_ratio.current, 4.0);
    }

    #[test]
    fn crawl_ratio_ignores_diameter() {
        let cfg = DrivetrainConfig {
            axle_gear_ratio: Some(4.10),
            transfer_case_low_ratio: 2.72,
            first_gear_ratio: 4.17,
            ..DrivetrainConfig::default()
        };
        let small = drivetrain_impact(30.0, 31.0, &cfg).unwrap();
        let big = drivetrain_impact(30.0, 40.0, &cfg).unwrap();
        assert_eq!(small.crawl_ratio.change, 0.0);
        assert_eq!(big.crawl_ratio.change, 0.0);
        assert_eq!(small.crawl_ratio.new, big.crawl_ratio.new);
        assert!(big.crawl_speed_mph.new > small.crawl_speed_mph.new);
    }

    #[test]
    fn restoration_ratio_scales_with_diameter() {
        let impact = drivetrain_impact(31.0, 35.0, &DrivetrainConfig::with_axle(3.73)).unwrap();
        assert_abs_diff_eq!(impact.restoration_ratio, 3.73 * 35.0 / 31.0, epsilon = 1e-12);
    }
}
