//! Diameter resolution for metric sizes.
//!
//! Lookup order:
//! 1. measured table keyed `"{width}/{aspect}R{wheel}"` (about ±0.2in of a mounted tire)
//! 2. nominal formula `2 × (width × aspect / 100 / 25.4) + wheel`
//!
//! The formula is noticeably less accurate (about ±0.5in): real tires usually
//! run smaller than nominal, more so on tall LT sidewalls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::MeasuredDiameters;
use crate::domain::{DiameterSource, fmt_size_number};
use crate::math::mm_to_in;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDiameter {
    pub diameter_in: f64,
    pub source: DiameterSource,
}

/// Nominal sidewall height in millimeters.
pub fn sidewall_mm(width_mm: f64, aspect_pct: f64) -> f64 {
    width_mm * aspect_pct / 100.0
}

/// Nominal overall diameter in inches.
pub fn formula_diameter(width_mm: f64, aspect_pct: f64, wheel_in: f64) -> f64 {
    2.0 * mm_to_in(sidewall_mm(width_mm, aspect_pct)) + wheel_in
}

/// Measured-table key for a metric size.
pub fn measured_key(width_mm: u32, aspect_pct: u32, wheel_in: f64) -> String {
    format!("{width_mm}/{aspect_pct}R{}", fmt_size_number(wheel_in))
}

pub fn resolve_diameter(
    width_mm: u32,
    aspect_pct: u32,
    wheel_in: f64,
    table: &MeasuredDiameters,
) -> ResolvedDiameter {
    let key = measured_key(width_mm, aspect_pct, wheel_in);
    if let Some(d) = table.get(&key) {
        debug!(size = %key, diameter_in = d, "using measured diameter");
        return ResolvedDiameter {
            diameter_in: d,
            source: DiameterSource::Measured,
        };
    }

    let d = formula_diameter(width_mm as f64, aspect_pct as f64, wheel_in);
    debug!(size = %key, diameter_in = d, "no measured entry; using nominal formula");
    ResolvedDiameter {
        diameter_in: d,
        source: DiameterSource::Formula,
    }
}
