//! Advisory checks on a finished comparison.
//!
//! Advisories never block a result. They flag values a caller should surface
//! (very large diameter increases, speedometer error, lost load capacity) with
//! a severity tag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::ComparisonResult;
use crate::compare::weight::ImpactSeverity;
use crate::domain::{DiameterSource, TireFormat};

const DIAMETER_WARNING_PCT: f64 = 10.0;
const DIAMETER_CRITICAL_PCT: f64 = 15.0;
const SPEEDO_CAUTION_PCT: f64 = 3.0;
const SPEEDO_WARNING_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    Info,
    Caution,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub severity: AdvisorySeverity,
    pub code: String,
    pub message: String,
}

impl Advisory {
    fn new(severity: AdvisorySeverity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Build advisories for `result`, most severe first.
pub fn collect_advisories(result: &ComparisonResult) -> Vec<Advisory> {
    let mut out = Vec::new();

    let diameter_pct = result.differences.diameter.percentage;
    if diameter_pct > DIAMETER_CRITICAL_PCT {
        out.push(Advisory::new(
            AdvisorySeverity::Critical,
            "diameter_increase",
            format!(
                "Diameter increase of {diameter_pct:.1}% exceeds {DIAMETER_CRITICAL_PCT:.0}%; axle shafts, brakes and steering are well beyond their design envelope."
            ),
        ));
    } else if diameter_pct > DIAMETER_WARNING_PCT {
        out.push(Advisory::new(
            AdvisorySeverity::Warning,
            "diameter_increase",
            format!("Diameter increase of {diameter_pct:.1}% will noticeably load the drivetrain; plan on re-gearing."),
        ));
    }

    let speedo_pct = result.speedometer_error.error_percentage.abs();
    if speedo_pct > SPEEDO_WARNING_PCT {
        out.push(Advisory::new(
            AdvisorySeverity::Warning,
            "speedometer_error",
            format!("Speedometer will be off by {speedo_pct:.1}%; recalibrate before driving on the road."),
        ));
    } else if speedo_pct > SPEEDO_CAUTION_PCT {
        out.push(Advisory::new(
            AdvisorySeverity::Caution,
            "speedometer_error",
            format!("Speedometer will be off by {speedo_pct:.1}%; recalibration is recommended."),
        ));
    }

    if let Some(load) = &result.load_capacity_analysis {
        if load.adequate == Some(false) {
            out.push(Advisory::new(
                AdvisorySeverity::Critical,
                "load_capacity",
                format!(
                    "New tire capacity {:.0} lbs is below the {:.0} lbs needed per corner.",
                    load.new_capacity_lbs,
                    load.required_per_tire_lbs.unwrap_or_default()
                ),
            ));
        } else if load.change_lbs < 0.0 {
            out.push(Advisory::new(
                AdvisorySeverity::Warning,
                "load_capacity",
                format!("Load capacity drops by {:.0} lbs per tire.", -load.change_lbs),
            ));
        }
    }

    if result.current.tire.is_load_range_lt && result.new.tire.format == TireFormat::PMetric {
        out.push(Advisory::new(
            AdvisorySeverity::Caution,
            "construction",
            "Replacing LT construction with a P-metric tire reduces load capacity and sidewall puncture resistance.",
        ));
    }

    if let Some(weight) = &result.weight_analysis {
        if weight.severity == ImpactSeverity::High {
            out.push(Advisory::new(
                AdvisorySeverity::Caution,
                "rotating_mass",
                format!(
                    "Rotating mass rises {:.0}%; braking distances and acceleration will suffer.",
                    weight.rotational_inertia_change_percentage
                ),
            ));
        }
    }

    for (label, metrics) in [("current", &result.current), ("new", &result.new)] {
        if metrics.tire.diameter_source == DiameterSource::Formula && metrics.tire.format != TireFormat::Flotation {
            out.push(Advisory::new(
                AdvisorySeverity::Info,
                "nominal_diameter",
                format!(
                    "No measured diameter for {} ({label}); using the nominal formula (about ±0.5in).",
                    metrics.display
                ),
            ));
        }
    }

    out.sort_by(|a, b| b.severity.cmp(&a.severity));
    for a in &out {
        debug!(severity = ?a.severity, code = %a.code, "advisory");
    }
    out
}
