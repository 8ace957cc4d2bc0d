//! Dimensional differences between two tires.

use serde::{Deserialize, Serialize};

use crate::domain::TireDescriptor;
use crate::math::delta;

/// Absolute change and percentage change relative to the current tire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub absolute: f64,
    pub percentage: f64,
}

impl Delta {
    pub fn between(current: f64, new: f64) -> Self {
        let (absolute, percentage) = delta(current, new);
        Self { absolute, percentage }
    }
}

/// All dimensions in inches except `revs_per_mile`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Differences {
    pub diameter: Delta,
    pub width: Delta,
    pub sidewall: Delta,
    pub circumference: Delta,
    /// Axle-height gain: half the diameter change, relative to the current radius.
    pub ground_clearance: Delta,
    pub revs_per_mile: Delta,
}

pub fn compute_differences(current: &TireDescriptor, new: &TireDescriptor) -> Differences {
    Differences {
        diameter: Delta::between(current.diameter_in, new.diameter_in),
        width: Delta::between(current.section_width_in(), new.section_width_in()),
        sidewall: Delta::between(current.sidewall_height_in, new.sidewall_height_in),
        circumference: Delta::between(current.circumference_in(), new.circumference_in()),
        // The axle only rises by the radius increase.
        ground_clearance: Delta::between(current.diameter_in / 2.0, new.diameter_in / 2.0),
        revs_per_mile: Delta::between(current.revolutions_per_mile(), new.revolutions_per_mile()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReferenceData;
    use crate::tire::parse_tire_size;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ground_clearance_is_half_of_diameter() {
        let table = ReferenceData::builtin().measured_diameters;
        let a = parse_tire_size("265/70R17", &table).unwrap();
        let b = parse_tire_size("35x12.50R17", &table).unwrap();
        let d = compute_differences(&a, &b);
        assert_abs_diff_eq!(d.diameter.absolute, 3.4, epsilon = 1e-9);
        assert_abs_diff_eq!(d.ground_clearance.absolute, 1.7, epsilon = 1e-9);
        assert_abs_diff_eq!(d.ground_clearance.percentage, d.diameter.percentage, epsilon = 1e-9);
        assert!(d.revs_per_mile.absolute < 0.0);
    }
}
