//! Rule-of-thumb re-gearing guidance keyed by diameter increase (inches).
//!
//! Qualitative and deterministic: the same increase always yields the same text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegearingGuidance {
    pub label: String,
    pub summary: String,
    pub notes: Vec<String>,
}

struct Rule {
    /// Exclusive upper bound; the last rule is open-ended.
    below_in: f64,
    label: &'static str,
    summary: &'static str,
    notes: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        below_in: 1.0,
        label: "Not needed",
        summary: "Under an inch of growth is inside normal tread-wear variation.",
        notes: &["Stock gearing is fine.", "Speedometer error stays within a couple of percent."],
    },
    Rule {
        below_in: 2.0,
        label: "Optional",
        summary: "Most drivers won't notice; towing or mountain driving may show it.",
        notes: &[
            "Automatic transmissions may hunt between top gears on grades.",
            "Recalibrate the speedometer.",
        ],
    },
    Rule {
        below_in: 3.0,
        label: "Recommended",
        summary: "Acceleration and highway passing feel noticeably softer.",
        notes: &[
            "Common move is one or two catalog steps numerically higher.",
            "Fuel economy usually improves after re-gearing at this size.",
            "Recalibrate the speedometer.",
        ],
    },
    Rule {
        below_in: 4.0,
        label: "Strongly recommended",
        summary: "The drivetrain is working noticeably harder; transmission temps climb when towing.",
        notes: &[
            "Re-gear both axles to the same ratio.",
            "Consider a transmission cooler if towing.",
            "Check brake capacity for the added rotating mass.",
        ],
    },
    Rule {
        below_in: f64::INFINITY,
        label: "Essential",
        summary: "Without re-gearing, expect overheating, constant downshifts and accelerated wear.",
        notes: &[
            "Re-gear both axles; add lockers while the carriers are out.",
            "Upgrade axle shafts and steering components on lighter-duty axles.",
            "Budget for brake upgrades.",
        ],
    },
];

/// Negative and NaN increases count as no increase.
pub fn regearing_guidance(diameter_increase_in: f64) -> RegearingGuidance {
    let inc = diameter_increase_in.max(0.0);
    let rule = RULES
        .iter()
        .find(|r| inc < r.below_in)
        .unwrap_or(&RULES[RULES.len() - 1]);
    RegearingGuidance {
        label: rule.label.to_string(),
        summary: rule.summary.to_string(),
        notes: rule.notes.iter().map(|n| n.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        assert_eq!(regearing_guidance(0.5).label, "Not needed");
        assert_eq!(regearing_guidance(1.0).label, "Optional");
        assert_eq!(regearing_guidance(2.9).label, "Recommended");
        assert_eq!(regearing_guidance(3.0).label, "Strongly recommended");
        assert_eq!(regearing_guidance(4.0).label, "Essential");
        assert_eq!(regearing_guidance(12.0).label, "Essential");
    }

    #[test]
    fn shrinking_and_nan_are_not_needed() {
        assert_eq!(regearing_guidance(-2.0).label, "Not needed");
        let nan = regearing_guidance(f64::NAN);
        assert_eq!(nan.label, "Not needed");
        assert_eq!(nan, regearing_guidance(0.0));
    }
}
