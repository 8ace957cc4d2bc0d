//! Tire-size parsing and diameter resolution.

pub mod diameter;
pub mod parser;

pub use diameter::*;
pub use parser::*;
