//! Unit conversions and rolling-geometry helpers.
//!
//! - `circumference(d) = d × π`
//! - `revolutions_per_mile(d) = 63360 / circumference(d)`
//!
//! All lengths are inches unless a name says otherwise.

use std::f64::consts::PI;

pub const MM_PER_INCH: f64 = 25.4;

/// Inches in one statute mile.
pub const INCHES_PER_MILE: f64 = 63_360.0;

pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn in_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Rolling circumference of a tire with diameter `diameter_in`.
pub fn circumference(diameter_in: f64) -> f64 {
    diameter_in * PI
}

/// Wheel revolutions per mile for a tire with diameter `diameter_in`.
pub fn revolutions_per_mile(diameter_in: f64) -> f64 {
    INCHES_PER_MILE / circumference(diameter_in)
}

/// Absolute change and percentage change relative to `current`.
///
/// A zero `current` yields `0%` rather than an infinity.
pub fn delta(current: f64, new: f64) -> (f64, f64) {
    let absolute = new - current;
    let pct = if current.abs() > f64::EPSILON {
        absolute / current * 100.0
    } else {
        0.0
    };
    (absolute, pct)
}
