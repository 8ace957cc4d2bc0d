//! Tire comparison: current tire vs. candidate tire.
//!
//! `compare` runs every sub-calculation and returns a single immutable
//! [`ComparisonResult`]:
//!
//! - dimensional differences (`differences`)
//! - speedometer error (`speedometer`)
//! - drivetrain impact, only when an axle ratio is known (`drivetrain`)
//! - quick clearance buckets (`clearance`)
//! - weight and load-capacity analysis (`weight`, `load`)
//! - severity-tagged advisories (`advisories`)
//!
//! Inputs are validated up front; a bad number fails the whole call before
//! anything is computed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::ReferenceData;
use crate::domain::{ComparisonOptions, IntendedUse, TireDescriptor};
use crate::error::{CalcError, require_positive};
use crate::tire::parse_tire_size;

pub mod advisories;
pub mod clearance;
pub mod differences;
pub mod drivetrain;
pub mod load;
pub mod speedometer;
pub mod weight;

pub use advisories::{Advisory, AdvisorySeverity, collect_advisories};
pub use clearance::{ClearanceImpact, clearance_impact};
pub use differences::{Delta, Differences, compute_differences};
pub use drivetrain::{BeforeAfter, DrivetrainImpact, drivetrain_impact};
pub use load::{LoadCapacityAnalysis, load_capacity_analysis};
pub use speedometer::{SpeedReading, SpeedometerError, SpeedometerReads, TEST_SPEEDS_MPH, speedometer_error};
pub use weight::{ImpactSeverity, WeightAnalysis, WeightSource, weight_analysis};

/// A tire plus its derived rolling metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireMetrics {
    pub tire: TireDescriptor,
    pub circumference_in: f64,
    pub revolutions_per_mile: f64,
    pub display: String,
}

impl TireMetrics {
    pub fn from_tire(tire: &TireDescriptor) -> Self {
        Self {
            circumference_in: tire.circumference_in(),
            revolutions_per_mile: tire.revolutions_per_mile(),
            display: tire.display(),
            tire: tire.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub current: TireMetrics,
    pub new: TireMetrics,
    pub intended_use: IntendedUse,
    pub differences: Differences,
    pub speedometer_error: SpeedometerError,
    /// `None` iff no axle ratio was supplied.
    pub drivetrain_impact: Option<DrivetrainImpact>,
    pub clearance: ClearanceImpact,
    pub weight_analysis: Option<WeightAnalysis>,
    pub load_capacity_analysis: Option<LoadCapacityAnalysis>,
    pub advisories: Vec<Advisory>,
}

/// Compare two parsed tires.
pub fn compare(
    current: &TireDescriptor,
    new: &TireDescriptor,
    options: &ComparisonOptions,
) -> Result<ComparisonResult, CalcError> {
    validate_inputs(current, new, options)?;

    let differences = compute_differences(current, new);
    let speedometer = speedometer_error(current.diameter_in, new.diameter_in);
    let drivetrain = drivetrain_impact(current.diameter_in, new.diameter_in, &options.drivetrain);
    let clearance = clearance_impact(&differences);

    let specs = &options.tire_specs;
    let weight = weight_analysis(
        current,
        new,
        &specs.current,
        &specs.new,
        options.intended_use,
        options.estimate_missing_weights,
    );
    let load = load_capacity_analysis(current, new, &specs.current, &specs.new, options.vehicle_weight_lbs);

    debug!(
        current = %current.display(),
        new = %new.display(),
        diameter_pct = differences.diameter.percentage,
        has_drivetrain = drivetrain.is_some(),
        "compared tires"
    );

    let mut result = ComparisonResult {
        current: TireMetrics::from_tire(current),
        new: TireMetrics::from_tire(new),
        intended_use: options.intended_use,
        differences,
        speedometer_error: speedometer,
        drivetrain_impact: drivetrain,
        clearance,
        weight_analysis: weight,
        load_capacity_analysis: load,
        advisories: Vec::new(),
    };
    result.advisories = collect_advisories(&result);
    Ok(result)
}

/// Parse both sizes against `reference` and compare them.
pub fn compare_sizes(
    current: &str,
    new: &str,
    options: &ComparisonOptions,
    reference: &ReferenceData,
) -> Result<ComparisonResult, CalcError> {
    let current = parse_tire_size(current, &reference.measured_diameters)?;
    let new = parse_tire_size(new, &reference.measured_diameters)?;
    compare(&current, &new, options)
}

fn validate_inputs(
    current: &TireDescriptor,
    new: &TireDescriptor,
    options: &ComparisonOptions,
) -> Result<(), CalcError> {
    require_positive("current diameter", current.diameter_in)?;
    require_positive("new diameter", new.diameter_in)?;
    options.drivetrain.validate()?;
    options.tire_specs.current.validate("current tire weight")?;
    options.tire_specs.new.validate("new tire weight")?;
    if let Some(w) = options.vehicle_weight_lbs {
        require_positive("vehicle weight", w)?;
    }
    Ok(())
}
