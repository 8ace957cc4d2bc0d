//! Tire-size parsing.
//!
//! Accepted grammars (case-insensitive, whitespace anywhere is ignored):
//!
//! - metric: `[P|LT]width/aspectRwheel`, e.g. `LT285/75R16`, `265/70R17`, `235/85R16.5`
//! - flotation: `diameterxwidth[R|-]wheel`, e.g. `35x12.50R17`, `33X10.5-15`
//!
//! Metric widths and aspect ratios are integers; wheel diameters may carry a
//! fractional part. A bare metric size is treated as P-metric.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::MeasuredDiameters;
use crate::domain::{DiameterSource, TireDescriptor, TireFormat};
use crate::error::ParseError;
use crate::math::{in_to_mm, mm_to_in};
use crate::tire::diameter::{resolve_diameter, sidewall_mm};

static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(P|LT)?(\d+)/(\d+)R(\d+(?:\.\d+)?)$").expect("metric size pattern")
});

static FLOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)X(\d+(?:\.\d+)?)[R-](\d+(?:\.\d+)?)$").expect("flotation size pattern")
});

/// Parse a tire-size string and resolve its diameter against `table`.
pub fn parse_tire_size(input: &str, table: &MeasuredDiameters) -> Result<TireDescriptor, ParseError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ParseError::new(input, "empty size"));
    }

    if let Some(caps) = METRIC_RE.captures(&compact) {
        let prefix = caps.get(1).map(|m| m.as_str().to_ascii_uppercase());
        let width = parse_int(input, &caps[2], "section width")?;
        let aspect = parse_int(input, &caps[3], "aspect ratio")?;
        let wheel = parse_float(input, &caps[4], "wheel diameter")?;
        return Ok(build_metric(input, prefix.as_deref(), width, aspect, wheel, table));
    }

    if let Some(caps) = FLOTATION_RE.captures(&compact) {
        let diameter = parse_float(input, &caps[1], "overall diameter")?;
        let width = parse_float(input, &caps[2], "section width")?;
        let wheel = parse_float(input, &caps[3], "wheel diameter")?;
        if diameter <= wheel {
            return Err(ParseError::new(
                input,
                format!("overall diameter {diameter} must exceed wheel diameter {wheel}"),
            ));
        }
        return Ok(build_flotation(input, diameter, width, wheel));
    }

    Err(ParseError::new(
        input,
        "expected metric (e.g. LT285/75R16) or flotation (e.g. 35x12.50R17) notation",
    ))
}

fn build_metric(
    input: &str,
    prefix: Option<&str>,
    width: u32,
    aspect: u32,
    wheel: f64,
    table: &MeasuredDiameters,
) -> TireDescriptor {
    let format = match prefix {
        Some("LT") => TireFormat::LtMetric,
        _ => TireFormat::PMetric,
    };
    let sidewall_mm = sidewall_mm(width as f64, aspect as f64);
    let resolved = resolve_diameter(width, aspect, wheel, table);

    TireDescriptor {
        format,
        section_width_mm: width as f64,
        aspect_ratio_pct: aspect as f64,
        wheel_diameter_in: wheel,
        sidewall_height_in: mm_to_in(sidewall_mm),
        sidewall_height_mm: sidewall_mm,
        diameter_in: resolved.diameter_in,
        diameter_mm: in_to_mm(resolved.diameter_in),
        is_load_range_lt: format == TireFormat::LtMetric,
        diameter_source: resolved.source,
        raw_input: input.to_string(),
    }
}

fn build_flotation(input: &str, diameter: f64, width: f64, wheel: f64) -> TireDescriptor {
    let sidewall_in = (diameter - wheel) / 2.0;
    TireDescriptor {
        format: TireFormat::Flotation,
        section_width_mm: in_to_mm(width),
        // Equivalent aspect ratio for downstream fitment logic.
        aspect_ratio_pct: sidewall_in / width * 100.0,
        wheel_diameter_in: wheel,
        sidewall_height_in: sidewall_in,
        sidewall_height_mm: in_to_mm(sidewall_in),
        diameter_in: diameter,
        diameter_mm: in_to_mm(diameter),
        // Flotation sizes are LT-class construction.
        is_load_range_lt: true,
        diameter_source: DiameterSource::Formula,
        raw_input: input.to_string(),
    }
}

fn parse_int(input: &str, raw: &str, what: &str) -> Result<u32, ParseError> {
    match raw.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ParseError::new(input, format!("invalid {what} '{raw}'"))),
    }
}

fn parse_float(input: &str, raw: &str, what: &str) -> Result<f64, ParseError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ParseError::new(input, format!("invalid {what} '{raw}'"))),
    }
}
