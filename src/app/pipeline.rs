//! Shared "compare pipeline" logic.
//!
//! Keeps the core workflow in one place:
//! parse -> compare -> stress -> re-gear -> clearance
//!
//! so the binary only deals with presentation (text vs JSON).

use serde::Serialize;
use tracing::info;

use crate::clearance::{ClearanceEstimate, estimate_clearance, input_from_comparison};
use crate::compare::{ComparisonResult, compare_sizes};
use crate::data::ReferenceData;
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::regear::{RegearRecommendation, RegearingGuidance, recommend_regear, regearing_guidance};
use crate::stress::{StressScoreResult, stress_from_comparison};

/// All computed outputs of a single `tire compare` run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub comparison: ComparisonResult,
    /// `None` without an axle ratio.
    pub stress: Option<StressScoreResult>,
    /// `None` without an axle ratio.
    pub regear: Option<RegearRecommendation>,
    /// `None` without a suspension type.
    pub clearance: Option<ClearanceEstimate>,
    pub guidance: RegearingGuidance,
}

/// Execute the comparison pipeline and return the computed outputs.
pub fn run_comparison(config: &RunConfig, reference: &ReferenceData) -> Result<RunOutput, AppError> {
    let options = &config.options;

    // 1) Parse and compare.
    let comparison = compare_sizes(&config.current_size, &config.new_size, options, reference)?;

    // 2) Stress and re-gear only make sense with a known axle ratio.
    let stress = stress_from_comparison(&comparison, config.vehicle_weight_lbs)?;
    let regear = match options.drivetrain.axle_gear_ratio {
        Some(axle) => Some(recommend_regear(
            &comparison,
            axle,
            options.intended_use,
            &options.drivetrain,
            reference,
        )?),
        None => None,
    };

    // 3) Clearance needs the suspension layout.
    let clearance = match config.suspension {
        Some(suspension) => Some(estimate_clearance(&input_from_comparison(
            &comparison,
            suspension,
            config.lift_height_in,
        ))?),
        None => None,
    };

    let guidance = regearing_guidance(comparison.differences.diameter.absolute);

    info!(
        current = %comparison.current.display,
        new = %comparison.new.display,
        stress = stress.as_ref().map(|s| s.score),
        advisories = comparison.advisories.len(),
        "comparison complete"
    );

    Ok(RunOutput {
        comparison,
        stress,
        regear,
        clearance,
        guidance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComparisonOptions, DrivetrainConfig, IntendedUse, SuspensionType};

    fn config(axle: Option<f64>, suspension: Option<SuspensionType>) -> RunConfig {
        RunConfig {
            current_size: "265/70R17".to_string(),
            new_size: "35x12.50R17".to_string(),
            options: ComparisonOptions {
                drivetrain: DrivetrainConfig {
                    axle_gear_ratio: axle,
                    ..DrivetrainConfig::default()
                },
                intended_use: IntendedUse::Overland,
                ..ComparisonOptions::default()
            },
            vehicle_weight_lbs: Some(5_200.0),
            suspension,
            lift_height_in: 2.0,
            json: false,
        }
    }

    #[test]
    fn full_run_with_axle_and_suspension() {
        crate::logging::init_test();
        let out = run_comparison(&config(Some(3.73), Some(SuspensionType::Ifs)), &ReferenceData::builtin()).unwrap();
        assert!(out.stress.is_some());
        let regear = out.regear.unwrap();
        assert!(!regear.candidates.is_empty());
        assert!(out.clearance.is_some());
        assert_eq!(out.guidance.label, "Strongly recommended");
    }

    #[test]
    fn no_axle_skips_dependent_outputs() {
        let out = run_comparison(&config(None, None), &ReferenceData::builtin()).unwrap();
        assert!(out.comparison.drivetrain_impact.is_none());
        assert!(out.stress.is_none());
        assert!(out.regear.is_none());
        assert!(out.clearance.is_none());
    }

    #[test]
    fn output_serializes_to_json() {
        let out = run_comparison(&config(Some(4.10), Some(SuspensionType::SolidAxle)), &ReferenceData::builtin()).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert!(json["comparison"]["drivetrain_impact"].is_object());
        assert!(json["stress"]["score"].is_u64());
    }

    #[test]
    fn bad_size_maps_to_exit_code_two() {
        let mut cfg = config(None, None);
        cfg.new_size = "35x".to_string();
        let err = run_comparison(&cfg, &ReferenceData::builtin()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
