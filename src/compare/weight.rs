//! Unsprung / rotating weight analysis.
//!
//! Weights come from the caller's tire specs when given; otherwise they are
//! estimated from the tire's silhouette (`diameter × width`), which tracks
//! published weights of all-terrain and mud-terrain tires to within roughly
//! 10%.
//!
//! Severity thresholds depend on the use case on purpose: a daily driver feels
//! extra unsprung weight in ride, braking and economy long before a rock
//! crawler at walking pace does.

use serde::{Deserialize, Serialize};

use crate::domain::{IntendedUse, TireDescriptor, TireFormat, TireSpec};
use crate::math::delta;

/// Pounds per square inch of `diameter × section width` for LT construction.
const LBS_PER_SILHOUETTE_SQ_IN: f64 = 0.157;
/// Passenger construction is lighter than LT for the same size.
const P_METRIC_WEIGHT_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Supplied,
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSeverity {
    Low,
    Medium,
    High,
}

/// Per-tire weight increase (lbs) at which impact becomes `(medium, high)`.
pub fn severity_thresholds(intended_use: IntendedUse) -> (f64, f64) {
    match intended_use {
        IntendedUse::DailyDriver => (8.0, 15.0),
        IntendedUse::WeekendTrail => (10.0, 20.0),
        IntendedUse::Overland => (10.0, 20.0),
        IntendedUse::RockCrawling => (15.0, 30.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAnalysis {
    pub current_weight_lbs: f64,
    pub new_weight_lbs: f64,
    pub current_source: WeightSource,
    pub new_source: WeightSource,
    pub per_tire_change_lbs: f64,
    /// Four corners; spares are not counted.
    pub total_unsprung_change_lbs: f64,
    pub change_percentage: f64,
    /// Change in rotational inertia (`m × r²`) in percent.
    pub rotational_inertia_change_percentage: f64,
    pub severity: ImpactSeverity,
    pub notes: Vec<String>,
}

/// Estimated weight (lbs) of a tire from its dimensions.
pub fn estimate_tire_weight(tire: &TireDescriptor) -> f64 {
    let silhouette = tire.diameter_in * tire.section_width_in();
    let factor = match tire.format {
        TireFormat::PMetric => P_METRIC_WEIGHT_FACTOR,
        TireFormat::LtMetric | TireFormat::Flotation => 1.0,
    };
    silhouette * LBS_PER_SILHOUETTE_SQ_IN * factor
}

fn resolve_weight(tire: &TireDescriptor, spec: &TireSpec, estimate: bool) -> Option<(f64, WeightSource)> {
    match spec.weight_lbs {
        Some(w) => Some((w, WeightSource::Supplied)),
        None if estimate => Some((estimate_tire_weight(tire), WeightSource::Estimated)),
        None => None,
    }
}

/// `None` when a weight is missing and estimation is disabled.
pub fn weight_analysis(
    current: &TireDescriptor,
    new: &TireDescriptor,
    current_spec: &TireSpec,
    new_spec: &TireSpec,
    intended_use: IntendedUse,
    estimate_missing: bool,
) -> Option<WeightAnalysis> {
    let (current_w, current_source) = resolve_weight(current, current_spec, estimate_missing)?;
    let (new_w, new_source) = resolve_weight(new, new_spec, estimate_missing)?;

    let (per_tire, change_pct) = delta(current_w, new_w);

    let current_r = current.diameter_in / 2.0;
    let new_r = new.diameter_in / 2.0;
    let (_, inertia_pct) = delta(current_w * current_r * current_r, new_w * new_r * new_r);

    let (medium, high) = severity_thresholds(intended_use);
    let severity = if per_tire >= high {
        ImpactSeverity::High
    } else if per_tire >= medium {
        ImpactSeverity::Medium
    } else {
        ImpactSeverity::Low
    };

    let mut notes = Vec::new();
    if current_source == WeightSource::Estimated || new_source == WeightSource::Estimated {
        notes.push("One or both tire weights are estimated from size; supply actual weights for accuracy.".to_string());
    }
    match severity {
        ImpactSeverity::High => notes.push(format!(
            "+{per_tire:.0} lbs per corner is a large unsprung increase for {}; expect slower acceleration and longer stops.",
            intended_use.display_name().to_lowercase()
        )),
        ImpactSeverity::Medium => notes.push(format!(
            "+{per_tire:.0} lbs per corner will be noticeable in acceleration and braking."
        )),
        ImpactSeverity::Low => {}
    }

    Some(WeightAnalysis {
        current_weight_lbs: current_w,
        new_weight_lbs: new_w,
        current_source,
        new_source,
        per_tire_change_lbs: per_tire,
        total_unsprung_change_lbs: per_tire * 4.0,
        change_percentage: change_pct,
        rotational_inertia_change_percentage: inertia_pct,
        severity,
        notes,
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
    fn estimate_is_in_a_sane_range() {
        let w = estimate_tire_weight(&tire("35x12.50R17"));
        assert!(w > 60.0 && w < 75.0, "35x12.50 estimated at {w}");
        let p = estimate_tire_weight(&tire("265/70R17"));
        assert!(p > 35.0 && p < 50.0, "265/70R17 estimated at {p}");
    }

    #[test]
    fn supplied_weights_win() {
        let spec_a = TireSpec { weight_lbs: Some(45.0), load_index: None };
        let spec_b = TireSpec { weight_lbs: Some(65.0), load_index: None };
        let a = weight_analysis(
            &tire("265/70R17"),
            &tire("35x12.50R17"),
            &spec_a,
            &spec_b,
            IntendedUse::DailyDriver,
            true,
        )
        .unwrap();
        assert_eq!(a.current_source, WeightSource::Supplied);
        assert_abs_diff_eq!(a.per_tire_change_lbs, 20.0);
        assert_abs_diff_eq!(a.total_unsprung_change_lbs, 80.0);
        assert_eq!(a.severity, ImpactSeverity::High);
        assert!(a.rotational_inertia_change_percentage > a.change_percentage);
    }

    #[test]
    fn severity_is_use_case_dependent() {
        let spec_a = TireSpec { weight_lbs: Some(50.0), load_index: None };
        let spec_b = TireSpec { weight_lbs: Some(62.0), load_index: None };
        let t_a = tire("265/70R17");
        let t_b = tire("285/75R17");
        let daily = weight_analysis(&t_a, &t_b, &spec_a, &spec_b, IntendedUse::DailyDriver, true).unwrap();
        let rock = weight_analysis(&t_a, &t_b, &spec_a, &spec_b, IntendedUse::RockCrawling, true).unwrap();
        assert_eq!(daily.severity, ImpactSeverity::Medium);
        assert_eq!(rock.severity, ImpactSeverity::Low);
    }

    #[test]
    fn missing_weight_without_estimation_is_none() {
        let a = weight_analysis(
            &tire("265/70R17"),
            &tire("285/75R17"),
            &TireSpec::default(),
            &TireSpec::default(),
            IntendedUse::Overland,
            false,
        );
        assert!(a.is_none());
    }
}
