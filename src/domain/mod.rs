//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the parsed tire (`TireDescriptor`, `TireFormat`, `DiameterSource`)
//! - input configuration enums (`IntendedUse`, `SuspensionType`)
//! - engine options with documented defaults (`DrivetrainConfig`, `ComparisonOptions`)
//! - the CLI-derived `RunConfig`

pub mod types;

pub use types::*;
