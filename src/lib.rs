//! `tire-impact` library crate.
//!
//! The binary (`tire`) is a thin wrapper around this library so that:
//!
//! - the calculation engine is testable without spawning processes
//! - modules are reusable (e.g., a web front-end or batch exporter)
//! - code stays easy to navigate as the project grows
//!
//! Engine entry points: [`tire::parse_tire_size`], [`compare::compare`],
//! [`stress::score_stress`], [`clearance::estimate_clearance`],
//! [`regear::recommend_regear`] and [`regear::regearing_guidance`].

pub mod app;
pub mod clearance;
pub mod cli;
pub mod compare;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod math;
pub mod regear;
pub mod report;
pub mod stress;
pub mod tire;
