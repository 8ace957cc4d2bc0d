//! Clearance probability estimator.
//!
//! Estimates the chance that a larger tire rubs somewhere at full lock or full
//! compression. Independent of the comparison engine: callers feed it raw
//! deltas (or take them from a `ComparisonResult`).
//!
//! Base probability comes from a per-suspension decision tree:
//!
//! | lift (in) | Δd ≤ 1 | Δd ≤ 2.5 | Δd > 2.5 |
//! |---|---|---|---|
//! | IFS stock (< 1) | 25 | 60 | 85 |
//! | IFS 1–2.5 | 10 | 35 | 65 |
//! | IFS 2.5–3.5 | 5 | 20 | 45 |
//! | IFS ≥ 3.5 | 5 | 10 | 30 |
//! | solid stock (< 1) | 15 | 45 | 75 |
//! | solid 1–2.5 | 5 | 25 | 50 |
//! | solid 2.5–3.5 | 5 | 15 | 35 |
//! | solid ≥ 3.5 | 5 | 10 | 20 |
//!
//! A width penalty, a diameter floor and a cap are applied after the lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::ComparisonResult;
use crate::domain::{ClearanceInput, SuspensionType};
use crate::error::{CalcError, InvalidConfigError, require_non_negative, require_positive};

/// Base probabilities, rows by lift bracket, columns by diameter bracket.
type Tree = [[f64; 3]; 4];

const IFS_TREE: Tree = [
    [25.0, 60.0, 85.0],
    [10.0, 35.0, 65.0],
    [5.0, 20.0, 45.0],
    [5.0, 10.0, 30.0],
];

const SOLID_AXLE_TREE: Tree = [
    [15.0, 45.0, 75.0],
    [5.0, 25.0, 50.0],
    [5.0, 15.0, 35.0],
    [5.0, 10.0, 20.0],
];

/// Per-suspension constants for the post-lookup adjustments.
#[derive(Debug, Clone, Copy)]
struct SuspensionRules {
    tree: &'static Tree,
    width_penalty_over_in: f64,
    width_penalty_pct: f64,
    floor_diameter_in: f64,
    floor_pct: f64,
    cap_pct: f64,
    lift_factor: f64,
}

const IFS_RULES: SuspensionRules = SuspensionRules {
    tree: &IFS_TREE,
    width_penalty_over_in: 1.5,
    width_penalty_pct: 15.0,
    floor_diameter_in: 37.0,
    floor_pct: 75.0,
    cap_pct: 95.0,
    lift_factor: 0.85,
};

const SOLID_AXLE_RULES: SuspensionRules = SuspensionRules {
    tree: &SOLID_AXLE_TREE,
    width_penalty_over_in: 2.0,
    width_penalty_pct: 10.0,
    floor_diameter_in: 40.0,
    floor_pct: 70.0,
    cap_pct: 90.0,
    lift_factor: 0.75,
};

fn rules(suspension: SuspensionType) -> &'static SuspensionRules {
    match suspension {
        SuspensionType::Ifs => &IFS_RULES,
        SuspensionType::SolidAxle => &SOLID_AXLE_RULES,
    }
}

fn lift_bracket(lift_in: f64) -> usize {
    if lift_in < 1.0 {
        0
    } else if lift_in < 2.5 {
        1
    } else if lift_in < 3.5 {
        2
    } else {
        3
    }
}

fn diameter_bracket(increase_in: f64) -> usize {
    if increase_in <= 1.0 {
        0
    } else if increase_in <= 2.5 {
        1
    } else {
        2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskClass {
    Low,
    Moderate,
    High,
}

impl RiskClass {
    pub fn from_probability(pct: f64) -> Self {
        if pct < 30.0 {
            RiskClass::Low
        } else if pct <= 70.0 {
            RiskClass::Moderate
        } else {
            RiskClass::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimmingExtent {
    None,
    Minor,
    Moderate,
    Major,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimmingAssessment {
    pub extent: TrimmingExtent,
    pub description: String,
}

impl TrimmingAssessment {
    pub fn from_probability(pct: f64) -> Self {
        let (extent, description) = if pct < 20.0 {
            (TrimmingExtent::None, "No trimming expected.")
        } else if pct < 40.0 {
            (TrimmingExtent::Minor, "Possible minor trimming of the air dam or mud flaps.")
        } else if pct < 70.0 {
            (
                TrimmingExtent::Moderate,
                "Expect to trim plastic fender liners and possibly the bumper corners.",
            )
        } else {
            (
                TrimmingExtent::Major,
                "Major trimming likely: pinch-weld, body mount or cab-mount chop territory.",
            )
        };
        Self {
            extent,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftRecommendation {
    /// Total lift the new tire wants.
    pub recommended_total_in: f64,
    /// What is still missing on top of the current lift; never negative.
    pub additional_in: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearanceEstimate {
    pub suspension: SuspensionType,
    pub base_probability: f64,
    pub width_penalty: f64,
    pub floor_applied: bool,
    /// Final rub probability in percent, `0..=95`.
    pub probability: f64,
    pub risk_class: RiskClass,
    pub primary_issue: String,
    pub component_warnings: Vec<String>,
    pub lift_recommendation: LiftRecommendation,
    pub trimming_assessment: TrimmingAssessment,
}

pub fn estimate_clearance(input: &ClearanceInput) -> Result<ClearanceEstimate, CalcError> {
    let lift = require_non_negative("lift height", input.lift_height_in)?;
    let new_diameter = require_positive("new diameter", input.new_diameter_in)?;
    let d_inc = require_finite("diameter increase", input.diameter_increase_in)?;
    let w_inc = require_finite("width increase", input.width_increase_in)?;
    let rules = rules(input.suspension);

    let base = rules.tree[lift_bracket(lift)][diameter_bracket(d_inc)];
    let width_penalty = if w_inc > rules.width_penalty_over_in {
        rules.width_penalty_pct
    } else {
        0.0
    };
    let mut probability = base + width_penalty;
    let floor_applied = new_diameter >= rules.floor_diameter_in && probability < rules.floor_pct;
    if floor_applied {
        probability = rules.floor_pct;
    }
    let probability = probability.clamp(0.0, rules.cap_pct);
    let risk_class = RiskClass::from_probability(probability);

    let recommended_total = (d_inc * rules.lift_factor).max(0.0);
    let lift_recommendation = LiftRecommendation {
        recommended_total_in: recommended_total,
        additional_in: (recommended_total - lift).max(0.0),
    };

    debug!(
        suspension = ?input.suspension,
        base,
        width_penalty,
        floor_applied,
        probability,
        "estimated clearance"
    );

    Ok(ClearanceEstimate {
        suspension: input.suspension,
        base_probability: base,
        width_penalty,
        floor_applied,
        probability,
        risk_class,
        primary_issue: primary_issue(input.suspension, d_inc, w_inc, floor_applied),
        component_warnings: component_warnings(input.suspension, d_inc, w_inc, new_diameter, probability),
        lift_recommendation,
        trimming_assessment: TrimmingAssessment::from_probability(probability),
    })
}

fn require_finite(field: &'static str, value: f64) -> Result<f64, InvalidConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidConfigError {
            field,
            value,
            reason: "must be finite",
        })
    }
}

/// Build the estimator input from a comparison.
pub fn input_from_comparison(result: &ComparisonResult, suspension: SuspensionType, lift_height_in: f64) -> ClearanceInput {
    ClearanceInput {
        suspension,
        lift_height_in,
        diameter_increase_in: result.differences.diameter.absolute,
        width_increase_in: result.differences.width.absolute,
        new_diameter_in: result.new.tire.diameter_in,
    }
}

fn primary_issue(suspension: SuspensionType, d_inc: f64, w_inc: f64, floor_applied: bool) -> String {
    let wide = w_inc > rules(suspension).width_penalty_over_in;
    let issue = match (suspension, wide) {
        _ if d_inc <= 0.0 && w_inc <= 0.0 && !floor_applied => "No size increase",
        (SuspensionType::Ifs, _) if floor_applied => {
            "Tire diameter is beyond what IFS geometry clears without major modification"
        }
        (SuspensionType::SolidAxle, _) if floor_applied => {
            "Tire diameter needs substantial lift and bump-stop work on a solid axle"
        }
        (SuspensionType::Ifs, true) => "Width: upper control arm and sway bar contact at full lock",
        (SuspensionType::Ifs, false) => "Height: fender liner and upper control arm contact under compression",
        (SuspensionType::SolidAxle, true) => "Width: frame and tie-rod contact at full lock",
        (SuspensionType::SolidAxle, false) => "Height: fender contact at full articulation",
    };
    issue.to_string()
}

fn component_warnings(
    suspension: SuspensionType,
    d_inc: f64,
    w_inc: f64,
    new_diameter: f64,
    probability: f64,
) -> Vec<String> {
    let mut out = Vec::new();
    match suspension {
        SuspensionType::Ifs => {
            if d_inc > 1.0 || w_inc > 1.0 {
                out.push("Upper control arm: check clearance at full lock and droop".to_string());
            }
            if w_inc > 1.0 {
                out.push("Sway bar end links: check at full lock".to_string());
            }
            if d_inc > 2.0 {
                out.push("CV axles: lifted IFS runs steeper CV angles".to_string());
            }
        }
        SuspensionType::SolidAxle => {
            if w_inc > 1.0 {
                out.push("Tie rod and drag link: check clearance at full lock".to_string());
            }
            if d_inc > 2.0 {
                out.push("Bump stops: extend to keep the tire out of the fender at full stuff".to_string());
            }
        }
    }
    if w_inc > 1.0 {
        out.push("Wheel offset: less backspacing may be needed".to_string());
    }
    if probability > 70.0 {
        out.push("Fender flares or trimming: likely required".to_string());
    }
    if new_diameter >= 35.0 {
        out.push("Brakes and steering: larger tires add leverage on both".to_string());
    }
    out
}
