//! Rough clearance impact from the diameter and width change.
//!
//! This is the quick bucket table used in a comparison; the suspension-aware
//! probability model lives in `crate::clearance`.

use serde::{Deserialize, Serialize};

use crate::compare::differences::Differences;

/// Width increase (in) above which fenders are a concern.
const FENDER_WIDTH_IN: f64 = 1.0;
/// Diameter increase (in) above which fenders are a concern.
const FENDER_DIAMETER_IN: f64 = 2.0;
/// Width increase (in) above which a wheel offset change is needed.
const OFFSET_WIDTH_IN: f64 = 1.5;

/// `(max diameter increase, estimated lift, guidance)`, ascending.
const LIFT_BUCKETS: &[(f64, f64, &str)] = &[
    (1.5, 0.0, "Should fit on stock suspension; check full-lock steering for rub."),
    (3.0, 1.0, "A leveling kit or about 1in of lift is typically needed."),
    (4.5, 2.0, "Plan on about 2in of lift and possible minor trimming."),
    (6.0, 4.0, "Requires roughly 4in of lift plus trimming."),
];
const LIFT_OVERFLOW: (f64, &str) = (
    5.0,
    "Requires 5in or more of lift, significant trimming and likely fender modifications.",
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearanceImpact {
    pub diameter_increase_in: f64,
    pub width_increase_in: f64,
    pub estimated_lift_required_in: f64,
    pub guidance: String,
    pub fender_clearance_concern: bool,
    pub wheel_offset_change_needed: bool,
}

pub fn clearance_impact(differences: &Differences) -> ClearanceImpact {
    let diameter_increase = differences.diameter.absolute;
    let width_increase = differences.width.absolute;

    let (lift, guidance) = LIFT_BUCKETS
        .iter()
        .find(|(max, _, _)| diameter_increase <= *max)
        .map(|&(_, lift, text)| (lift, text))
        .unwrap_or(LIFT_OVERFLOW);

    ClearanceImpact {
        diameter_increase_in: diameter_increase,
        width_increase_in: width_increase,
        estimated_lift_required_in: lift,
        guidance: guidance.to_string(),
        fender_clearance_concern: width_increase > FENDER_WIDTH_IN || diameter_increase > FENDER_DIAMETER_IN,
        wheel_offset_change_needed: width_increase > OFFSET_WIDTH_IN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::differences::Delta;

    fn diffs(diameter: f64, width: f64) -> Differences {
        let d = Delta { absolute: diameter, percentage: 0.0 };
        let w = Delta { absolute: width, percentage: 0.0 };
        Differences {
            diameter: d,
            width: w,
            sidewall: d,
            circumference: d,
            ground_clearance: d,
            revs_per_mile: d,
        }
    }

    #[test]
    fn buckets_map_to_lift() {
        let cases = [
            (-1.0, 0.0),
            (1.5, 0.0),
            (2.0, 1.0),
            (3.0, 1.0),
            (4.0, 2.0),
            (5.5, 4.0),
            (6.5, 5.0),
        ];
        for (inc, lift) in cases {
            assert_eq!(clearance_impact(&diffs(inc, 0.0)).estimated_lift_required_in, lift, "inc={inc}");
        }
    }

    #[test]
    fn fender_and_offset_flags() {
        let c = clearance_impact(&diffs(1.0, 1.2));
        assert!(c.fender_clearance_concern);
        assert!(!c.wheel_offset_change_needed);

        let c = clearance_impact(&diffs(2.5, 0.0));
        assert!(c.fender_clearance_concern);

        let c = clearance_impact(&diffs(0.5, 1.6));
        assert!(c.wheel_offset_change_needed);

        let c = clearance_impact(&diffs(1.0, 0.5));
        assert!(!c.fender_clearance_concern);
    }
}
