//! Shared input types.
//!
//! These are the value objects a caller hands to the engine: parsed tire
//! descriptors, drivetrain configuration, per-tire spec overrides and the
//! intended use of the vehicle. They are immutable once built and
//! serializable so they can be echoed back in reports.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfigError, require_positive};
use crate::math::{MM_PER_INCH, circumference, revolutions_per_mile};

/// Sizing notation a tire was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TireFormat {
    /// Passenger metric (`P265/70R17`) or bare Euro-metric (`265/70R17`).
    PMetric,
    /// Light-truck metric (`LT285/75R16`).
    LtMetric,
    /// Flotation (`35x12.50R17`): diameter and width given in inches.
    Flotation,
}

impl TireFormat {
    pub fn display_name(self) -> &'static str {
        match self {
            TireFormat::PMetric => "P-metric",
            TireFormat::LtMetric => "LT-metric",
            TireFormat::Flotation => "Flotation",
        }
    }
}

/// Where a resolved diameter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiameterSource {
    /// Real-world measured value (tape/retailer data, roughly ±0.2in).
    Measured,
    /// Closed-form nominal value (roughly ±0.5in vs. a mounted tire).
    Formula,
}

/// A parsed and diameter-resolved tire size.
///
/// For `DiameterSource::Formula` entries, `diameter_in == 2 * sidewall_height_in + wheel_diameter_in`.
/// Measured entries keep the nominal sidewall and may violate that identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireDescriptor {
    pub format: TireFormat,
    pub section_width_mm: f64,
    /// Aspect ratio in percent. Back-computed for flotation sizes.
    pub aspect_ratio_pct: f64,
    pub wheel_diameter_in: f64,
    pub sidewall_height_in: f64,
    pub sidewall_height_mm: f64,
    pub diameter_in: f64,
    pub diameter_mm: f64,
    pub is_load_range_lt: bool,
    pub diameter_source: DiameterSource,
    pub raw_input: String,
}

impl TireDescriptor {
    pub fn section_width_in(&self) -> f64 {
        self.section_width_mm / MM_PER_INCH
    }

    pub fn circumference_in(&self) -> f64 {
        circumference(self.diameter_in)
    }

    pub fn revolutions_per_mile(&self) -> f64 {
        revolutions_per_mile(self.diameter_in)
    }

    /// Canonical display form (`LT285/75R16`, `35x12.5R17`).
    pub fn display(&self) -> String {
        match self.format {
            TireFormat::PMetric | TireFormat::LtMetric => {
                let prefix = if self.format == TireFormat::LtMetric { "LT" } else { "" };
                format!(
                    "{prefix}{:.0}/{:.0}R{}",
                    self.section_width_mm,
                    self.aspect_ratio_pct,
                    fmt_size_number(self.wheel_diameter_in)
                )
            }
            TireFormat::Flotation => format!(
                "{}x{}R{}",
                fmt_size_number(self.diameter_in),
                fmt_size_number(self.section_width_in()),
                fmt_size_number(self.wheel_diameter_in)
            ),
        }
    }
}

/// Format a size number without a trailing `.0` (`17`, `17.5`, `12.5`).
pub fn fmt_size_number(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract().abs() < 1e-9 {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// How the vehicle is mainly used. Drives bias tables, severity thresholds
/// and the re-gear target profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IntendedUse {
    DailyDriver,
    WeekendTrail,
    Overland,
    RockCrawling,
}

impl IntendedUse {
    pub const ALL: [IntendedUse; 4] = [
        IntendedUse::DailyDriver,
        IntendedUse::WeekendTrail,
        IntendedUse::Overland,
        IntendedUse::RockCrawling,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            IntendedUse::DailyDriver => "Daily driver",
            IntendedUse::WeekendTrail => "Weekend trail",
            IntendedUse::Overland => "Overland",
            IntendedUse::RockCrawling => "Rock crawling",
        }
    }

    /// Key used in reference-data tables (`daily_driver`, ...).
    pub fn key(self) -> &'static str {
        match self {
            IntendedUse::DailyDriver => "daily_driver",
            IntendedUse::WeekendTrail => "weekend_trail",
            IntendedUse::Overland => "overland",
            IntendedUse::RockCrawling => "rock_crawling",
        }
    }
}

/// Front suspension layout, which decides the clearance decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionType {
    /// Independent front suspension; upper control arms limit clearance.
    Ifs,
    /// Solid front axle.
    SolidAxle,
}

impl SuspensionType {
    pub fn display_name(self) -> &'static str {
        match self {
            SuspensionType::Ifs => "IFS",
            SuspensionType::SolidAxle => "Solid axle",
        }
    }
}

/// Drivetrain ratios.
///
/// Only `axle_gear_ratio` is required for drivetrain outputs; without it every
/// drivetrain-dependent result is `None`. Defaults:
/// - transmission top gear: `1.0` (direct drive)
/// - transfer case high: `1.0`
/// - transfer case low: `2.5`
/// - first gear: `4.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivetrainConfig {
    pub axle_gear_ratio: Option<f64>,
    pub transmission_top_gear_ratio: f64,
    /// Feeds the high-range top-gear overall ratio only; cruise RPM assumes 2WD.
    pub transfer_case_high_ratio: f64,
    pub transfer_case_low_ratio: f64,
    pub first_gear_ratio: f64,
}

impl Default for DrivetrainConfig {
    fn default() -> Self {
        Self {
            axle_gear_ratio: None,
            transmission_top_gear_ratio: 1.0,
            transfer_case_high_ratio: 1.0,
            transfer_case_low_ratio: 2.5,
            first_gear_ratio: 4.0,
        }
    }
}

impl DrivetrainConfig {
    pub fn with_axle(axle_gear_ratio: f64) -> Self {
        Self {
            axle_gear_ratio: Some(axle_gear_ratio),
            ..Self::default()
        }
    }

    /// Reject non-positive or non-finite ratios.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if let Some(axle) = self.axle_gear_ratio {
            require_positive("axle_gear_ratio", axle)?;
        }
        require_positive("transmission_top_gear_ratio", self.transmission_top_gear_ratio)?;
        require_positive("transfer_case_high_ratio", self.transfer_case_high_ratio)?;
        require_positive("transfer_case_low_ratio", self.transfer_case_low_ratio)?;
        require_positive("first_gear_ratio", self.first_gear_ratio)?;
        Ok(())
    }

    /// Total low-range reduction for a given axle ratio.
    pub fn crawl_ratio(&self, axle_gear_ratio: f64) -> f64 {
        axle_gear_ratio * self.transfer_case_low_ratio * self.first_gear_ratio
    }
}

/// Optional per-tire specs that override estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TireSpec {
    pub weight_lbs: Option<f64>,
    pub load_index: Option<u16>,
}

impl TireSpec {
    pub fn validate(&self, field: &'static str) -> Result<(), InvalidConfigError> {
        if let Some(w) = self.weight_lbs {
            require_positive(field, w)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TireSpecOverrides {
    pub current: TireSpec,
    pub new: TireSpec,
}

/// Everything `compare` needs besides the two tires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonOptions {
    pub drivetrain: DrivetrainConfig,
    pub tire_specs: TireSpecOverrides,
    pub intended_use: IntendedUse,
    /// Curb weight (lbs); only used for load-capacity adequacy.
    pub vehicle_weight_lbs: Option<f64>,
    /// When `false`, a missing tire weight leaves `weight_analysis` as `None`
    /// instead of estimating it from dimensions.
    pub estimate_missing_weights: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            drivetrain: DrivetrainConfig::default(),
            tire_specs: TireSpecOverrides::default(),
            intended_use: IntendedUse::WeekendTrail,
            vehicle_weight_lbs: None,
            estimate_missing_weights: true,
        }
    }
}

/// Inputs for a clearance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearanceInput {
    pub suspension: SuspensionType,
    pub lift_height_in: f64,
    pub diameter_increase_in: f64,
    pub width_increase_in: f64,
    pub new_diameter_in: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub current_size: String,
    pub new_size: String,
    pub options: ComparisonOptions,
    /// Vehicle weight for stress scoring; falls back to the stress default.
    pub vehicle_weight_lbs: Option<f64>,
    pub suspension: Option<SuspensionType>,
    pub lift_height_in: f64,
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drivetrain_defaults_match_documentation() {
        let cfg = DrivetrainConfig::default();
        assert_eq!(cfg.axle_gear_ratio, None);
        assert_eq!(cfg.transmission_top_gear_ratio, 1.0);
        assert_eq!(cfg.transfer_case_high_ratio, 1.0);
        assert_eq!(cfg.transfer_case_low_ratio, 2.5);
        assert_eq!(cfg.first_gear_ratio, 4.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn drivetrain_validate_rejects_bad_ratios() {
        let mut cfg = DrivetrainConfig::with_axle(0.0);
        assert!(cfg.validate().is_err());

        cfg.axle_gear_ratio = Some(4.10);
        cfg.first_gear_ratio = f64::NAN;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.field, "first_gear_ratio");
    }

    #[test]
    fn size_numbers_drop_trailing_zeroes() {
        assert_eq!(fmt_size_number(17.0), "17");
        assert_eq!(fmt_size_number(17.5), "17.5");
        assert_eq!(fmt_size_number(12.50), "12.5");
        assert_eq!(fmt_size_number(10.25), "10.25");
    }

    #[test]
    fn crawl_ratio_multiplies_gear_train() {
        let cfg = DrivetrainConfig::with_axle(4.10);
        assert!((cfg.crawl_ratio(4.10) - 41.0).abs() < 1e-9);
    }
}
