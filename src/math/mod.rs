//! Mathematical utilities: unit conversions and gearing formulas.

pub mod gearing;
pub mod units;

pub use gearing::*;
pub use units::*;
