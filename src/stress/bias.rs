//! Use-case bias applied to the composite stress score.
//!
//! The multipliers are a tunable heuristic table, not a physical model:
//! daily drivers are penalized for spending their life at highway load,
//! rock crawlers get relief for low speeds, and overland rigs are only
//! penalized once the tire change is large enough to matter under load.

use crate::domain::IntendedUse;

/// Diameter change (%) above which overland builds get the heavier bias.
const OVERLAND_DIAMETER_PCT: f64 = 8.0;

type BiasFn = fn(diameter_change_pct: f64) -> f64;

fn daily_driver(_: f64) -> f64 {
    1.15
}

fn weekend_trail(_: f64) -> f64 {
    1.0
}

fn overland(diameter_change_pct: f64) -> f64 {
    if diameter_change_pct.abs() > OVERLAND_DIAMETER_PCT { 1.10 } else { 1.0 }
}

fn rock_crawling(_: f64) -> f64 {
    0.85
}

const BIAS_TABLE: [(IntendedUse, BiasFn); 4] = [
    (IntendedUse::DailyDriver, daily_driver),
    (IntendedUse::WeekendTrail, weekend_trail),
    (IntendedUse::Overland, overland),
    (IntendedUse::RockCrawling, rock_crawling),
];

/// Bias multiplier for `intended_use` at the given diameter change.
pub fn use_case_bias(intended_use: IntendedUse, diameter_change_pct: f64) -> f64 {
    BIAS_TABLE
        .iter()
        .find(|(u, _)| *u == intended_use)
        .map(|(_, f)| f(diameter_change_pct))
        .unwrap_or(1.0)
}
