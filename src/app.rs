//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - loads reference data (built-in tables plus CSV overrides)
//! - parses CLI arguments and dispatches
//! - prints text reports or JSON

use clap::Parser;
use serde::Serialize;
use tracing::warn;

use crate::cli::{ClearanceArgs, Command, CompareArgs, GuidanceArgs, ParseArgs};
use crate::data::{ReferenceData, ReferenceSources, load_reference};
use crate::domain::{ClearanceInput, ComparisonOptions, DrivetrainConfig, RunConfig, TireSpec, TireSpecOverrides};
use crate::error::{AppError, CalcError};

pub mod pipeline;

/// Entry point for the `tire` binary.
pub fn run() -> Result<(), AppError> {
    crate::logging::init();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Compare(args) => {
            let reference = load_reference_data()?;
            handle_compare(&args, &reference)
        }
        Command::Parse(args) => {
            let reference = load_reference_data()?;
            handle_parse(&args, &reference)
        }
        Command::Clearance(args) => handle_clearance(&args),
        Command::Guidance(args) => handle_guidance(&args),
    }
}

fn load_reference_data() -> Result<ReferenceData, AppError> {
    let loaded = load_reference(&ReferenceSources::from_env())?;
    if !loaded.row_errors.is_empty() {
        warn!(
            skipped = loaded.row_errors.len(),
            used = loaded.rows_used,
            "some reference rows were skipped"
        );
    }
    Ok(loaded.data)
}

fn handle_compare(args: &CompareArgs, reference: &ReferenceData) -> Result<(), AppError> {
    let config = run_config_from_args(args);
    let run = pipeline::run_comparison(&config, reference)?;

    if config.json {
        print_json(&run)?;
        return Ok(());
    }

    println!("{}", crate::report::format_comparison(&run.comparison));
    if let Some(stress) = &run.stress {
        println!("{}", crate::report::format_stress(stress));
    }
    if let Some(regear) = &run.regear {
        println!("{}", crate::report::format_regear(regear));
    }
    if let Some(clearance) = &run.clearance {
        println!("{}", crate::report::format_clearance(clearance));
    }
    println!(
        "{}",
        crate::report::format_guidance(run.comparison.differences.diameter.absolute, &run.guidance)
    );
    Ok(())
}

fn handle_parse(args: &ParseArgs, reference: &ReferenceData) -> Result<(), AppError> {
    let tires = args
        .sizes
        .iter()
        .map(|s| crate::tire::parse_tire_size(s, &reference.measured_diameters))
        .collect::<Result<Vec<_>, _>>()
        .map_err(CalcError::from)?;

    if args.json {
        return print_json(&tires);
    }
    for t in &tires {
        print!("{}", crate::report::format_tire(t));
    }
    Ok(())
}

fn handle_clearance(args: &ClearanceArgs) -> Result<(), AppError> {
    let estimate = crate::clearance::estimate_clearance(&ClearanceInput {
        suspension: args.suspension,
        lift_height_in: args.lift,
        diameter_increase_in: args.diameter_increase,
        width_increase_in: args.width_increase,
        new_diameter_in: args.new_diameter,
    })?;

    if args.json {
        return print_json(&estimate);
    }
    print!("{}", crate::report::format_clearance(&estimate));
    Ok(())
}

fn handle_guidance(args: &GuidanceArgs) -> Result<(), AppError> {
    let guidance = crate::regear::regearing_guidance(args.diameter_increase);
    if args.json {
        return print_json(&guidance);
    }
    print!("{}", crate::report::format_guidance(args.diameter_increase, &guidance));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

pub fn run_config_from_args(args: &CompareArgs) -> RunConfig {
    RunConfig {
        current_size: args.current.clone(),
        new_size: args.new.clone(),
        options: ComparisonOptions {
            drivetrain: DrivetrainConfig {
                axle_gear_ratio: args.axle,
                transmission_top_gear_ratio: args.trans_top,
                transfer_case_high_ratio: args.tc_high,
                transfer_case_low_ratio: args.tc_low,
                first_gear_ratio: args.first,
            },
            tire_specs: TireSpecOverrides {
                current: TireSpec {
                    weight_lbs: args.current_weight,
                    load_index: args.current_load_index,
                },
                new: TireSpec {
                    weight_lbs: args.new_weight,
                    load_index: args.new_load_index,
                },
            },
            intended_use: args.intended_use,
            vehicle_weight_lbs: args.vehicle_weight,
            estimate_missing_weights: !args.no_estimate,
        },
        vehicle_weight_lbs: args.vehicle_weight,
        suspension: args.suspension,
        lift_height_in: args.lift,
        json: args.json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::{IntendedUse, SuspensionType};

    #[test]
    fn run_config_carries_every_flag() {
        let cli = Cli::try_parse_from([
            "tire",
            "compare",
            "LT265/75R16",
            "LT285/75R16",
            "--axle",
            "4.10",
            "--trans-top",
            "0.7",
            "--use",
            "daily-driver",
            "--vehicle-weight",
            "5000",
            "--new-weight",
            "62",
            "--current-load-index",
            "123",
            "--new-load-index",
            "126",
            "--suspension",
            "ifs",
            "--no-estimate",
            "--json",
        ])
        .unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        let cfg = run_config_from_args(&args);
        assert_eq!(cfg.options.drivetrain.axle_gear_ratio, Some(4.10));
        assert_eq!(cfg.options.drivetrain.transmission_top_gear_ratio, 0.7);
        assert_eq!(cfg.options.intended_use, IntendedUse::DailyDriver);
        assert_eq!(cfg.options.tire_specs.new.weight_lbs, Some(62.0));
        assert_eq!(cfg.options.tire_specs.current.weight_lbs, None);
        assert_eq!(cfg.options.tire_specs.new.load_index, Some(126));
        assert!(!cfg.options.estimate_missing_weights);
        assert_eq!(cfg.vehicle_weight_lbs, Some(5_000.0));
        assert_eq!(cfg.suspension, Some(SuspensionType::Ifs));
        assert!(cfg.json);
    }
}
