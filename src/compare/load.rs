//! Load-capacity comparison from ISO load indexes.
//!
//! P-metric tires used on light trucks and SUVs are derated by 1.10, the
//! usual correction for passenger construction in light-truck service.

use serde::{Deserialize, Serialize};

use crate::domain::{TireDescriptor, TireFormat, TireSpec};
use crate::math::delta;

const KG_TO_LBS: f64 = 2.204_62;
const P_METRIC_LT_DERATE: f64 = 1.10;
/// Headroom over curb weight per corner for passengers and cargo.
const PAYLOAD_RESERVE: f64 = 1.2;

const FIRST_LOAD_INDEX: u16 = 70;

/// Load capacity in kg for indexes 70..=130.
const LOAD_INDEX_KG: [f64; 61] = [
    335.0, 345.0, 355.0, 365.0, 375.0, 387.0, 400.0, 412.0, 425.0, 437.0, // 70-79
    450.0, 462.0, 475.0, 487.0, 500.0, 515.0, 530.0, 545.0, 560.0, 580.0, // 80-89
    600.0, 615.0, 630.0, 650.0, 670.0, 690.0, 710.0, 730.0, 750.0, 775.0, // 90-99
    800.0, 825.0, 850.0, 875.0, 900.0, 925.0, 950.0, 975.0, 1000.0, 1030.0, // 100-109
    1060.0, 1090.0, 1120.0, 1150.0, 1180.0, 1215.0, 1250.0, 1285.0, 1320.0, 1360.0, // 110-119
    1400.0, 1450.0, 1500.0, 1550.0, 1600.0, 1650.0, 1700.0, 1750.0, 1800.0, 1850.0, // 120-129
    1900.0, // 130
];

/// Rated capacity (lbs) for a load index, or `None` outside 70..=130.
pub fn load_index_capacity_lbs(load_index: u16) -> Option<f64> {
    let idx = load_index.checked_sub(FIRST_LOAD_INDEX)? as usize;
    LOAD_INDEX_KG.get(idx).map(|kg| kg * KG_TO_LBS)
}

/// Capacity in light-truck service: P-metric ratings are derated.
pub fn effective_capacity_lbs(tire: &TireDescriptor, load_index: u16) -> Option<f64> {
    let rated = load_index_capacity_lbs(load_index)?;
    Some(match tire.format {
        TireFormat::PMetric => rated / P_METRIC_LT_DERATE,
        TireFormat::LtMetric | TireFormat::Flotation => rated,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCapacityAnalysis {
    pub current_load_index: u16,
    pub new_load_index: u16,
    pub current_capacity_lbs: f64,
    pub new_capacity_lbs: f64,
    pub change_lbs: f64,
    pub change_percentage: f64,
    /// Four tires combined.
    pub new_vehicle_capacity_lbs: f64,
    /// Per-corner requirement with payload headroom; `None` without a vehicle weight.
    pub required_per_tire_lbs: Option<f64>,
    pub adequate: Option<bool>,
}

/// `None` unless both tires have a known load index.
pub fn load_capacity_analysis(
    current: &TireDescriptor,
    new: &TireDescriptor,
    current_spec: &TireSpec,
    new_spec: &TireSpec,
    vehicle_weight_lbs: Option<f64>,
) -> Option<LoadCapacityAnalysis> {
    let current_li = current_spec.load_index?;
    let new_li = new_spec.load_index?;
    let current_cap = effective_capacity_lbs(current, current_li)?;
    let new_cap = effective_capacity_lbs(new, new_li)?;

    let (change, change_pct) = delta(current_cap, new_cap);
    let required = vehicle_weight_lbs.map(|w| w * PAYLOAD_RESERVE / 4.0);

    Some(LoadCapacityAnalysis {
        current_load_index: current_li,
        new_load_index: new_li,
        current_capacity_lbs: current_cap,
        new_capacity_lbs: new_cap,
        change_lbs: change,
        change_percentage: change_pct,
        new_vehicle_capacity_lbs: new_cap * 4.0,
        required_per_tire_lbs: required,
        adequate: required.map(|r| new_cap >= r),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReferenceData;
    use crate::tire::parse_tire_size;
    use approx::assert_abs_diff_eq;

    fn tire(s: &str) -> TireDescriptor {
        parse_tire_size(s, &ReferenceData::builtin().measured_diameters).unwrap()
    }

    #[test]
    fn load_index_table_bounds() {
        assert_abs_diff_eq!(load_index_capacity_lbs(100).unwrap(), 1763.7, epsilon = 0.1);
        assert_abs_diff_eq!(load_index_capacity_lbs(121).unwrap(), 3196.7, epsilon = 0.1);
        assert!(load_index_capacity_lbs(69).is_none());
        assert!(load_index_capacity_lbs(131).is_none());
        assert!(load_index_capacity_lbs(130).is_some());
    }

    #[test]
    fn p_metric_is_derated() {
        let p = effective_capacity_lbs(&tire("265/70R17"), 115).unwrap();
        let lt = effective_capacity_lbs(&tire("LT265/70R17"), 115).unwrap();
        assert_abs_diff_eq!(lt / p, 1.10, epsilon = 1e-12);
    }

    #[test]
    fn analysis_requires_both_indexes() {
        let a = tire("265/70R17");
        let b = tire("LT285/75R17");
        let with = TireSpec { weight_lbs: None, load_index: Some(115) };
        assert!(load_capacity_analysis(&a, &b, &with, &TireSpec::default(), None).is_none());

        let analysis = load_capacity_analysis(
            &a,
            &b,
            &with,
            &TireSpec { weight_lbs: None, load_index: Some(121) },
            Some(5_000.0),
        )
        .unwrap();
        assert!(analysis.change_lbs > 0.0);
        assert_abs_diff_eq!(analysis.required_per_tire_lbs.unwrap(), 1_500.0);
        assert_eq!(analysis.adequate, Some(true));
    }
}
