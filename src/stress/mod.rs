//! Drivetrain stress scoring.
//!
//! Four components, each scored 0–100 and capped:
//!
//! | component | formula | weight |
//! |---|---|---|
//! | diameter | `|Δd%| × 8` | 30% |
//! | weight | `|rotational% or Δw%| × 6` | 25% |
//! | gearing | `|Δeffective%| × 7` | 35% |
//! | vehicle mass | `(4500 / lbs − 1) × 200 + 50` | 10% |
//!
//! The weighted sum is multiplied by a use-case bias (`bias`), clamped to
//! `[0, 100]` and rounded. Lighter vehicles score higher on the mass
//! component: the same tire is a bigger share of what the drivetrain moves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::ComparisonResult;
use crate::domain::IntendedUse;
use crate::error::{CalcError, InvalidConfigError, require_positive};

pub mod bias;

pub use bias::use_case_bias;

pub const DEFAULT_VEHICLE_WEIGHT_LBS: f64 = 4_500.0;

pub const DIAMETER_WEIGHT: f64 = 0.30;
pub const TIRE_WEIGHT_WEIGHT: f64 = 0.25;
pub const GEARING_WEIGHT: f64 = 0.35;
pub const VEHICLE_MASS_WEIGHT: f64 = 0.10;

const DIAMETER_SCALE: f64 = 8.0;
const TIRE_WEIGHT_SCALE: f64 = 6.0;
const GEARING_SCALE: f64 = 7.0;

const LOW_MAX: u8 = 30;
const MODERATE_MAX: u8 = 60;
const IMMEDIATE_FROM: u8 = 75;

/// Inputs to the stress model. Percentages are signed; only magnitudes count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressParams {
    pub diameter_change_pct: f64,
    pub weight_change_pct: Option<f64>,
    /// Rotational-inertia change; preferred over `weight_change_pct` when present.
    pub rotational_factor_pct: Option<f64>,
    pub effective_ratio_change_pct: Option<f64>,
    pub vehicle_weight_lbs: f64,
    pub intended_use: IntendedUse,
}

impl StressParams {
    /// Derive params from a comparison, scored under the comparison's own
    /// intended use. `None` when the comparison has no drivetrain impact (no
    /// axle ratio).
    pub fn from_comparison(result: &ComparisonResult, vehicle_weight_lbs: Option<f64>) -> Option<Self> {
        let impact = result.drivetrain_impact.as_ref()?;
        let weight = result.weight_analysis.as_ref();
        Some(Self {
            diameter_change_pct: result.differences.diameter.percentage,
            weight_change_pct: weight.map(|w| w.change_percentage),
            rotational_factor_pct: weight.map(|w| w.rotational_inertia_change_percentage),
            effective_ratio_change_pct: Some(impact.effective_gear_ratio.change_percentage),
            vehicle_weight_lbs: vehicle_weight_lbs.unwrap_or(DEFAULT_VEHICLE_WEIGHT_LBS),
            intended_use: result.intended_use,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
}

impl ComponentScore {
    fn new(score: f64, weight: f64) -> Self {
        Self {
            score,
            weight,
            weighted: score * weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressComponents {
    pub diameter: ComponentScore,
    pub tire_weight: ComponentScore,
    pub gearing: ComponentScore,
    pub vehicle_mass: ComponentScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StressClass {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegearLevel {
    Optional,
    Recommended,
    Essential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Eventually,
    Soon,
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegearingAdvice {
    pub recommendation: RegearLevel,
    pub urgency: Urgency,
    pub priority: Priority,
    /// Percentage to raise the axle ratio by; `None` without gearing data.
    pub suggested_ratio_increase_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressScoreResult {
    pub components: StressComponents,
    pub weighted_sum: f64,
    pub bias_multiplier: f64,
    /// Final 0–100 score.
    pub score: u8,
    pub classification: StressClass,
    pub regearing: RegearingAdvice,
    pub intended_use: IntendedUse,
}

pub fn score_stress(params: &StressParams) -> Result<StressScoreResult, CalcError> {
    validate(params)?;

    let diameter = capped(params.diameter_change_pct.abs() * DIAMETER_SCALE);
    let tire_weight = params
        .rotational_factor_pct
        .or(params.weight_change_pct)
        .map(|pct| capped(pct.abs() * TIRE_WEIGHT_SCALE))
        .unwrap_or(0.0);
    let gearing = params
        .effective_ratio_change_pct
        .map(|pct| capped(pct.abs() * GEARING_SCALE))
        .unwrap_or(0.0);
    let vehicle_mass = capped((DEFAULT_VEHICLE_WEIGHT_LBS / params.vehicle_weight_lbs - 1.0) * 200.0 + 50.0);

    let components = StressComponents {
        diameter: ComponentScore::new(diameter, DIAMETER_WEIGHT),
        tire_weight: ComponentScore::new(tire_weight, TIRE_WEIGHT_WEIGHT),
        gearing: ComponentScore::new(gearing, GEARING_WEIGHT),
        vehicle_mass: ComponentScore::new(vehicle_mass, VEHICLE_MASS_WEIGHT),
    };

    let weighted_sum = components.diameter.weighted
        + components.tire_weight.weighted
        + components.gearing.weighted
        + components.vehicle_mass.weighted;
    let bias_multiplier = use_case_bias(params.intended_use, params.diameter_change_pct);
    let score = (weighted_sum * bias_multiplier).clamp(0.0, 100.0).round() as u8;

    let classification = classify(score);
    let regearing = regearing_advice(score, classification, params);

    debug!(score, ?classification, bias_multiplier, "scored drivetrain stress");

    Ok(StressScoreResult {
        components,
        weighted_sum,
        bias_multiplier,
        score,
        classification,
        regearing,
        intended_use: params.intended_use,
    })
}

/// Score the stress of a compared upgrade; `Ok(None)` when the comparison
/// carries no drivetrain impact.
pub fn stress_from_comparison(
    result: &ComparisonResult,
    vehicle_weight_lbs: Option<f64>,
) -> Result<Option<StressScoreResult>, CalcError> {
    match StressParams::from_comparison(result, vehicle_weight_lbs) {
        Some(params) => score_stress(&params).map(Some),
        None => Ok(None),
    }
}

pub fn classify(score: u8) -> StressClass {
    if score <= LOW_MAX {
        StressClass::Low
    } else if score <= MODERATE_MAX {
        StressClass::Moderate
    } else {
        StressClass::High
    }
}

fn regearing_advice(score: u8, class: StressClass, params: &StressParams) -> RegearingAdvice {
    let (recommendation, urgency, priority) = match class {
        StressClass::Low => (RegearLevel::Optional, Urgency::Eventually, Priority::Low),
        StressClass::Moderate => (RegearLevel::Recommended, Urgency::Soon, Priority::Medium),
        StressClass::High if score >= IMMEDIATE_FROM => (RegearLevel::Essential, Urgency::Immediate, Priority::High),
        StressClass::High => (RegearLevel::Essential, Urgency::Soon, Priority::High),
    };
    RegearingAdvice {
        recommendation,
        urgency,
        priority,
        // Restoring the effective ratio takes the same percentage as the diameter grew.
        suggested_ratio_increase_pct: params
            .effective_ratio_change_pct
            .map(|_| params.diameter_change_pct.abs()),
    }
}

fn capped(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

fn validate(params: &StressParams) -> Result<(), InvalidConfigError> {
    require_positive("vehicle weight", params.vehicle_weight_lbs)?;
    let finite = |field: &'static str, v: f64| {
        if v.is_finite() {
            Ok(())
        } else {
            Err(InvalidConfigError {
                field,
                value: v,
                reason: "must be finite",
            })
        }
    };
    finite("diameter change", params.diameter_change_pct)?;
    if let Some(v) = params.weight_change_pct {
        finite("weight change", v)?;
    }
    if let Some(v) = params.rotational_factor_pct {
        finite("rotational factor", v)?;
    }
    if let Some(v) = params.effective_ratio_change_pct {
        finite("effective ratio change", v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_sizes;
    use crate::data::ReferenceData;
    use crate::domain::{ComparisonOptions, DrivetrainConfig};
    use approx::assert_abs_diff_eq;

    fn params(diameter: f64, weight: f64, gearing: Option<f64>, use_: IntendedUse) -> StressParams {
        StressParams {
            diameter_change_pct: diameter,
            weight_change_pct: Some(weight),
            rotational_factor_pct: None,
            effective_ratio_change_pct: gearing,
            vehicle_weight_lbs: DEFAULT_VEHICLE_WEIGHT_LBS,
            intended_use: use_,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert_abs_diff_eq!(
            DIAMETER_WEIGHT + TIRE_WEIGHT_WEIGHT + GEARING_WEIGHT + VEHICLE_MASS_WEIGHT,
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn worked_example() {
        // diameter 5% → 40, weight 10% → 60, gearing -4.76% → 33.3, mass 4500 → 50
        let r = score_stress(&params(5.0, 10.0, Some(-4.76), IntendedUse::WeekendTrail)).unwrap();
        assert_abs_diff_eq!(r.components.diameter.score, 40.0);
        assert_abs_diff_eq!(r.components.tire_weight.score, 60.0);
        assert_abs_diff_eq!(r.components.gearing.score, 33.32, epsilon = 1e-9);
        assert_abs_diff_eq!(r.components.vehicle_mass.score, 50.0);
        // 12 + 15 + 11.662 + 5 = 43.662
        assert_eq!(r.score, 44);
        assert_eq!(r.classification, StressClass::Moderate);
        assert_eq!(r.regearing.recommendation, RegearLevel::Recommended);
        assert_eq!(r.regearing.urgency, Urgency::Soon);
        assert_eq!(r.regearing.suggested_ratio_increase_pct, Some(5.0));
    }

    #[test]
    fn components_are_capped() {
        let r = score_stress(&params(30.0, 50.0, Some(-25.0), IntendedUse::DailyDriver)).unwrap();
        assert_eq!(r.components.diameter.score, 100.0);
        assert_eq!(r.components.tire_weight.score, 100.0);
        assert_eq!(r.components.gearing.score, 100.0);
        assert_eq!(r.score, 100);
        assert_eq!(r.regearing.urgency, Urgency::Immediate);
    }

    #[test]
    fn rotational_factor_is_preferred() {
        let mut p = params(3.0, 10.0, None, IntendedUse::WeekendTrail);
        p.rotational_factor_pct = Some(15.0);
        let r = score_stress(&p).unwrap();
        assert_abs_diff_eq!(r.components.tire_weight.score, 90.0);
    }

    #[test]
    fn no_gearing_data_means_no_suggestion() {
        let r = score_stress(&params(3.0, 5.0, None, IntendedUse::WeekendTrail)).unwrap();
        assert_eq!(r.components.gearing.score, 0.0);
        assert_eq!(r.regearing.suggested_ratio_increase_pct, None);
    }

    #[test]
    fn lighter_vehicles_score_higher_and_heavy_ones_floor_at_zero() {
        let mut light = params(5.0, 5.0, Some(-5.0), IntendedUse::WeekendTrail);
        light.vehicle_weight_lbs = 3_500.0;
        let mut heavy = light;
        heavy.vehicle_weight_lbs = 9_000.0;
        let l = score_stress(&light).unwrap();
        let h = score_stress(&heavy).unwrap();
        assert!(l.components.vehicle_mass.score > h.components.vehicle_mass.score);
        assert_eq!(h.components.vehicle_mass.score, 0.0);
        assert!(l.score >= h.score);
    }

    #[test]
    fn bias_orders_use_cases() {
        let daily = score_stress(&params(6.0, 8.0, Some(-5.7), IntendedUse::DailyDriver)).unwrap();
        let trail = score_stress(&params(6.0, 8.0, Some(-5.7), IntendedUse::WeekendTrail)).unwrap();
        let rock = score_stress(&params(6.0, 8.0, Some(-5.7), IntendedUse::RockCrawling)).unwrap();
        assert!(daily.score > trail.score);
        assert!(trail.score > rock.score);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify(0), StressClass::Low);
        assert_eq!(classify(30), StressClass::Low);
        assert_eq!(classify(31), StressClass::Moderate);
        assert_eq!(classify(60), StressClass::Moderate);
        assert_eq!(classify(61), StressClass::High);
    }

    #[test]
    fn rejects_non_positive_vehicle_weight() {
        let mut p = params(3.0, 5.0, None, IntendedUse::WeekendTrail);
        p.vehicle_weight_lbs = 0.0;
        assert!(matches!(score_stress(&p), Err(CalcError::InvalidConfig(_))));
    }

    #[test]
    fn monotone_over_progressive_upgrades() {
        let reference = ReferenceData::builtin();
        let options = ComparisonOptions {
            drivetrain: DrivetrainConfig::with_axle(3.73),
            intended_use: IntendedUse::Overland,
            ..ComparisonOptions::default()
        };
        let mut last = 0u8;
        for new in ["285/70R17", "315/70R17", "37x12.50R17"] {
            let cmp = compare_sizes("265/70R17", new, &options, &reference).unwrap();
            let s = stress_from_comparison(&cmp, None)
                .unwrap()
                .unwrap();
            assert!(s.score >= last, "{new}: {} < {last}", s.score);
            last = s.score;
        }
    }

    #[test]
    fn no_axle_ratio_means_no_stress_score() {
        let cmp = compare_sizes(
            "265/70R17",
            "285/75R17",
            &ComparisonOptions::default(),
            &ReferenceData::builtin(),
        )
        .unwrap();
        assert!(stress_from_comparison(&cmp, Some(5_000.0)).unwrap().is_none());
    }

    #[test]
    fn scores_under_the_comparison_use_case() {
        let reference = ReferenceData::builtin();
        let scored = |intended_use: IntendedUse| {
            let options = ComparisonOptions {
                drivetrain: DrivetrainConfig::with_axle(3.73),
                intended_use,
                ..ComparisonOptions::default()
            };
            let cmp = compare_sizes("265/70R17", "37x12.50R17", &options, &reference).unwrap();
            let params = StressParams::from_comparison(&cmp, None).unwrap();
            assert_eq!(params.intended_use, intended_use);
            stress_from_comparison(&cmp, None).unwrap().unwrap()
        };
        let crawl = scored(IntendedUse::RockCrawling);
        let daily = scored(IntendedUse::DailyDriver);
        assert_eq!(crawl.intended_use, IntendedUse::RockCrawling);
        assert_eq!(daily.intended_use, IntendedUse::DailyDriver);
    }
}
