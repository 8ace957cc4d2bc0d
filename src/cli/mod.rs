//! Command-line parsing for the `tire` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculation code. `app` turns these structs into engine inputs.

use clap::{Parser, Subcommand};

use crate::domain::{IntendedUse, SuspensionType};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tire", version, about = "Tire-size swap impact calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two sizes: differences, speedometer, drivetrain, stress, re-gear and clearance.
    Compare(CompareArgs),
    /// Parse one or more sizes and print their resolved dimensions.
    Parse(ParseArgs),
    /// Estimate rub probability from raw deltas.
    Clearance(ClearanceArgs),
    /// Rule-of-thumb re-gearing guidance for a diameter increase.
    Guidance(GuidanceArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Current tire size (e.g. 265/70R17).
    pub current: String,

    /// Candidate tire size (e.g. 285/75R17 or 35x12.50R17).
    pub new: String,

    /// Axle (ring and pinion) ratio. Drivetrain outputs need it.
    #[arg(long)]
    pub axle: Option<f64>,

    /// Transmission top-gear ratio.
    #[arg(long, default_value_t = 1.0)]
    pub trans_top: f64,

    /// Transfer case high-range ratio.
    #[arg(long, default_value_t = 1.0)]
    pub tc_high: f64,

    /// Transfer case low-range ratio.
    #[arg(long, default_value_t = 2.5)]
    pub tc_low: f64,

    /// First-gear ratio.
    #[arg(long, default_value_t = 4.0)]
    pub first: f64,

    /// Intended use.
    #[arg(long = "use", value_enum, default_value_t = IntendedUse::WeekendTrail)]
    pub intended_use: IntendedUse,

    /// Vehicle curb weight (lbs).
    #[arg(long)]
    pub vehicle_weight: Option<f64>,

    /// Current tire weight (lbs); estimated from size when omitted.
    #[arg(long)]
    pub current_weight: Option<f64>,

    /// New tire weight (lbs); estimated from size when omitted.
    #[arg(long)]
    pub new_weight: Option<f64>,

    /// Do not estimate missing tire weights.
    #[arg(long)]
    pub no_estimate: bool,

    #[arg(long)]
    pub current_load_index: Option<u16>,

    #[arg(long)]
    pub new_load_index: Option<u16>,

    /// Front suspension; enables the clearance estimate.
    #[arg(long, value_enum)]
    pub suspension: Option<SuspensionType>,

    /// Current lift height (in).
    #[arg(long, default_value_t = 0.0)]
    pub lift: f64,

    /// Print JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ParseArgs {
    #[arg(required = true)]
    pub sizes: Vec<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ClearanceArgs {
    #[arg(long, value_enum)]
    pub suspension: SuspensionType,

    /// Current lift height (in).
    #[arg(long, default_value_t = 0.0)]
    pub lift: f64,

    /// Overall diameter increase (in).
    #[arg(long)]
    pub diameter_increase: f64,

    /// Section width increase (in).
    #[arg(long, default_value_t = 0.0)]
    pub width_increase: f64,

    /// New tire overall diameter (in).
    #[arg(long)]
    pub new_diameter: f64,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct GuidanceArgs {
    /// Overall diameter increase (in).
    pub diameter_increase: f64,

    #[arg(long)]
    pub json: bool,
}
