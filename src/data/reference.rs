//! Built-in reference tables.
//!
//! - measured tire diameters (size → inches), from tape measurements and
//!   retailer spec sheets of mounted, inflated tires
//! - commercially available ring-and-pinion ratios
//! - use-case profiles for re-gear targeting
//!
//! The tables are read-only after construction. The process-wide built-in
//! copy lives in [`BUILTIN`]; callers that load overrides build their own
//! [`ReferenceData`] once at startup and pass it down by reference.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::IntendedUse;

/// Built-in measured diameters, keyed `"{width}/{aspect}R{wheel}"`.
const MEASURED_DIAMETERS: &[(&str, f64)] = &[
    ("225/75R16", 29.1),
    ("235/75R15", 28.7),
    ("245/75R16", 30.3),
    ("255/75R17", 31.9),
    ("255/80R17", 32.9),
    ("265/60R18", 30.4),
    ("265/65R17", 30.4),
    ("265/70R16", 30.5),
    ("265/70R17", 31.6),
    ("265/75R16", 31.4),
    ("275/55R20", 31.8),
    ("275/60R20", 32.8),
    ("275/65R18", 31.9),
    ("275/70R18", 32.9),
    ("285/55R20", 32.2),
    ("285/65R18", 32.4),
    ("285/70R17", 32.5),
    ("285/75R16", 32.6),
    ("285/75R17", 32.8),
    ("295/70R17", 33.0),
    ("305/70R17", 33.6),
    ("315/70R17", 34.2),
    ("315/70R18", 35.1),
    ("315/75R16", 34.4),
    ("325/60R20", 35.1),
];

/// Ring-and-pinion ratios sold for common light-truck axles (ascending).
const GEAR_CATALOG: &[f64] = &[
    2.73, 3.07, 3.21, 3.23, 3.42, 3.55, 3.73, 3.91, 4.10, 4.30, 4.56, 4.88, 5.13, 5.38, 5.71,
];

/// What a use case optimizes for when picking gears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearPriority {
    FuelEconomy,
    Balanced,
    Acceleration,
    CrawlRatio,
}

impl GearPriority {
    /// Torque-priority profiles enforce a minimum crawl ratio.
    pub fn is_torque_priority(self) -> bool {
        matches!(self, GearPriority::CrawlRatio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UseCaseProfile {
    pub intended_use: IntendedUse,
    pub priority: GearPriority,
    /// Target engine RPM at the 65 mph reference speed.
    pub target_rpm: f64,
    pub min_crawl_ratio: Option<f64>,
}

const USE_CASE_PROFILES: &[UseCaseProfile] = &[
    UseCaseProfile {
        intended_use: IntendedUse::DailyDriver,
        priority: GearPriority::FuelEconomy,
        target_rpm: 2_000.0,
        min_crawl_ratio: None,
    },
    UseCaseProfile {
        intended_use: IntendedUse::WeekendTrail,
        priority: GearPriority::Balanced,
        target_rpm: 2_300.0,
        min_crawl_ratio: None,
    },
    UseCaseProfile {
        intended_use: IntendedUse::Overland,
        priority: GearPriority::Acceleration,
        target_rpm: 2_400.0,
        min_crawl_ratio: None,
    },
    UseCaseProfile {
        intended_use: IntendedUse::RockCrawling,
        priority: GearPriority::CrawlRatio,
        target_rpm: 2_500.0,
        min_crawl_ratio: Some(50.0),
    },
];

/// Measured-diameter lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasuredDiameters {
    entries: HashMap<String, f64>,
}

impl MeasuredDiameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. The key is normalized (`265/70r17` → `265/70R17`).
    pub fn insert(&mut self, size: &str, diameter_in: f64) {
        self.entries.insert(normalize_size_key(size), diameter_in);
    }

    pub fn get(&self, size: &str) -> Option<f64> {
        self.entries.get(&normalize_size_key(size)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_size_key(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Every read-only table the engine consults.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub measured_diameters: MeasuredDiameters,
    /// Available axle ratios, ascending. May be empty.
    pub gear_catalog: Vec<f64>,
    pub use_case_profiles: Vec<UseCaseProfile>,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        let mut measured_diameters = MeasuredDiameters::new();
        for &(size, d) in MEASURED_DIAMETERS {
            measured_diameters.insert(size, d);
        }
        Self {
            measured_diameters,
            gear_catalog: GEAR_CATALOG.to_vec(),
            use_case_profiles: USE_CASE_PROFILES.to_vec(),
        }
    }

    /// Tables with nothing in them. Parsing falls back to formulas and
    /// re-gear recommendations come back without candidates.
    pub fn empty() -> Self {
        Self {
            measured_diameters: MeasuredDiameters::new(),
            gear_catalog: Vec::new(),
            use_case_profiles: USE_CASE_PROFILES.to_vec(),
        }
    }

    /// Profile for `intended_use`, falling back to the built-in row when a
    /// loaded table omits it.
    pub fn profile(&self, intended_use: IntendedUse) -> UseCaseProfile {
        self.use_case_profiles
            .iter()
            .chain(USE_CASE_PROFILES.iter())
            .find(|p| p.intended_use == intended_use)
            .copied()
            .unwrap_or(UseCaseProfile {
                intended_use,
                priority: GearPriority::Balanced,
                target_rpm: 2_300.0,
                min_crawl_ratio: None,
            })
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Process-wide built-in reference data.
pub static BUILTIN: Lazy<ReferenceData> = Lazy::new(ReferenceData::builtin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_calibration_sizes() {
        let data = ReferenceData::builtin();
        assert_eq!(data.measured_diameters.get("265/70R17"), Some(31.6));
        assert_eq!(data.measured_diameters.get("285/75r17"), Some(32.8));
        assert_eq!(data.measured_diameters.len(), MEASURED_DIAMETERS.len());
    }

    #[test]
    fn gear_catalog_is_sorted() {
        let data = ReferenceData::builtin();
        assert!(data.gear_catalog.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_use_case_has_a_profile() {
        let data = ReferenceData::builtin();
        for u in IntendedUse::ALL {
            assert_eq!(data.profile(u).intended_use, u);
        }
        assert_eq!(
            data.profile(IntendedUse::RockCrawling).min_crawl_ratio,
            Some(50.0)
        );
    }

    #[test]
    fn empty_tables_still_resolve_profiles() {
        let data = ReferenceData::empty();
        assert!(data.measured_diameters.is_empty());
        assert!(data.gear_catalog.is_empty());
        assert_eq!(
            data.profile(IntendedUse::DailyDriver).priority,
            GearPriority::FuelEconomy
        );
    }
}
