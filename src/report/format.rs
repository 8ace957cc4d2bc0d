//! Formatted terminal output.
//!
//! Formatting lives here so that:
//! - the calculation modules stay free of presentation
//! - output changes are localized (important for future snapshot tests)

use crate::clearance::ClearanceEstimate;
use crate::compare::{AdvisorySeverity, BeforeAfter, ComparisonResult, Delta, TireMetrics, WeightSource};
use crate::domain::{TireDescriptor, fmt_size_number};
use crate::regear::{RegearRecommendation, RegearingGuidance};
use crate::stress::StressScoreResult;

/// Full comparison report: tires, differences, speedometer, drivetrain, advisories.
pub fn format_comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} -> {} ({}) ===\n",
        result.current.display,
        result.new.display,
        result.intended_use.display_name()
    ));
    out.push_str(&format_tire_line("Current", &result.current));
    out.push_str(&format_tire_line("New    ", &result.new));

    let d = &result.differences;
    out.push_str("\nDifferences:\n");
    out.push_str(&format_delta_line("Diameter", d.diameter, "in"));
    out.push_str(&format_delta_line("Width", d.width, "in"));
    out.push_str(&format_delta_line("Sidewall", d.sidewall, "in"));
    out.push_str(&format_delta_line("Circumference", d.circumference, "in"));
    out.push_str(&format_delta_line("Ground clearance", d.ground_clearance, "in"));
    out.push_str(&format_delta_line("Revs/mile", d.revs_per_mile, ""));

    let speedo = &result.speedometer_error;
    out.push_str(&format!(
        "\nSpeedometer: reads {:?} by {:.2}% (ratio {:.4})\n",
        speedo.reads,
        speedo.error_percentage.abs(),
        speedo.ratio
    ));
    for r in &speedo.readings {
        out.push_str(&format!(
            "  {:>3.0} mph indicated -> {:>5.1} mph actual ({:+.1})\n",
            r.indicated_mph, r.actual_mph, r.error_mph
        ));
    }

    match &result.drivetrain_impact {
        Some(impact) => {
            out.push_str(&format!(
                "\nDrivetrain (axle {:.2}, top gear {:.2}):\n",
                impact.axle_gear_ratio, impact.transmission_top_gear_ratio
            ));
            out.push_str(&format_before_after("Effective ratio", &impact.effective_gear_ratio, 3));
            out.push_str(&format_before_after(
                &format!("RPM @ {:.0} mph", impact.reference_speed_mph),
                &impact.rpm_at_reference_speed,
                0,
            ));
            out.push_str(&format_before_after("Top gear overall", &impact.top_gear_overall_ratio, 3));
            out.push_str(&format_before_after("Crawl ratio", &impact.crawl_ratio, 1));
            out.push_str(&format_before_after(
                &format!("Crawl mph @ {:.0} rpm", impact.crawl_reference_rpm),
                &impact.crawl_speed_mph,
                2,
            ));
            out.push_str(&format!("  Restoration ratio: {:.2}\n", impact.restoration_ratio));
        }
        None => out.push_str("\nDrivetrain: (no axle ratio given)\n"),
    }

    let c = &result.clearance;
    out.push_str(&format!(
        "\nClearance: ~{:.0}in lift | {}\n",
        c.estimated_lift_required_in, c.guidance
    ));
    if c.fender_clearance_concern {
        out.push_str("  - fender clearance concern\n");
    }
    if c.wheel_offset_change_needed {
        out.push_str("  - wheel offset change needed\n");
    }

    if let Some(w) = &result.weight_analysis {
        let estimated = w.current_source == WeightSource::Estimated || w.new_source == WeightSource::Estimated;
        out.push_str(&format!(
            "\nWeight{}: {:.1} -> {:.1} lbs ({:+.1} per tire, {:+.1} total, inertia {:+.1}%) [{:?}]\n",
            if estimated { " (estimated)" } else { "" },
            w.current_weight_lbs,
            w.new_weight_lbs,
            w.per_tire_change_lbs,
            w.total_unsprung_change_lbs,
            w.rotational_inertia_change_percentage,
            w.severity
        ));
    }

    if let Some(l) = &result.load_capacity_analysis {
        out.push_str(&format!(
            "Load: LI {} -> LI {} | {:.0} -> {:.0} lbs per tire ({:+.1}%)",
            l.current_load_index, l.new_load_index, l.current_capacity_lbs, l.new_capacity_lbs, l.change_percentage
        ));
        match l.adequate {
            Some(true) => out.push_str(" | adequate\n"),
            Some(false) => out.push_str(" | INADEQUATE\n"),
            None => out.push('\n'),
        }
    }

    if !result.advisories.is_empty() {
        out.push_str("\nAdvisories:\n");
        for a in &result.advisories {
            out.push_str(&format!("  [{}] {}\n", severity_tag(a.severity), a.message));
        }
    }

    out
}

pub fn format_stress(stress: &StressScoreResult) -> String {
    let mut out = String::new();
    let c = &stress.components;

    out.push_str(&format!(
        "Drivetrain stress: {}/100 ({:?})\n",
        stress.score, stress.classification
    ));
    for (name, comp) in [
        ("diameter", c.diameter),
        ("weight", c.tire_weight),
        ("gearing", c.gearing),
        ("vehicle", c.vehicle_mass),
    ] {
        out.push_str(&format!(
            "  {name:<8} {:>5.1} x {:.2} = {:>5.1}\n",
            comp.score, comp.weight, comp.weighted
        ));
    }
    out.push_str(&format!(
        "  bias x{:.2} ({})\n",
        stress.bias_multiplier,
        stress.intended_use.display_name()
    ));

    let r = &stress.regearing;
    out.push_str(&format!(
        "  Re-gear: {:?}, urgency {:?}, priority {:?}",
        r.recommendation, r.urgency, r.priority
    ));
    if let Some(pct) = r.suggested_ratio_increase_pct {
        out.push_str(&format!(", raise ratio ~{pct:.1}%"));
    }
    out.push('\n');

    out
}

pub fn format_clearance(estimate: &ClearanceEstimate) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Clearance ({}): {:.0}% rub probability, {:?} risk\n",
        estimate.suspension.display_name(),
        estimate.probability,
        estimate.risk_class
    ));
    out.push_str(&format!(
        "  base {:.0}%, width penalty +{:.0}{}\n",
        estimate.base_probability,
        estimate.width_penalty,
        if estimate.floor_applied { ", diameter floor applied" } else { "" }
    ));
    out.push_str(&format!("  Primary issue: {}\n", estimate.primary_issue));
    for w in &estimate.component_warnings {
        out.push_str(&format!("  - {w}\n"));
    }
    let lift = &estimate.lift_recommendation;
    out.push_str(&format!(
        "  Lift: {:.1}in total recommended, {:.1}in more than now\n",
        lift.recommended_total_in, lift.additional_in
    ));
    out.push_str(&format!(
        "  Trimming: {:?} ({})\n",
        estimate.trimming_assessment.extent, estimate.trimming_assessment.description
    ));

    out
}

pub fn format_regear(rec: &RegearRecommendation) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Re-gear ({:?}): {}\n",
        rec.necessity.level, rec.necessity.reason
    ));
    out.push_str(&format!(
        "  current {:.2} ({:.0} rpm @ {:.0} mph) | restoration {:.3} | optimal {:.3} (target {:.0} rpm)\n",
        rec.current_ratio, rec.original_rpm, rec.reference_speed_mph, rec.restoration_ratio, rec.optimal_ratio, rec.target_rpm
    ));

    if rec.candidates.is_empty() {
        out.push_str("  (no catalog ratios available)\n");
        return out;
    }

    out.push_str(&format!(
        "  {:<6} {:<12} {:>5} {:>6} {:>7} {:>6}\n",
        "ratio", "kind", "score", "rpm", "eff", "crawl"
    ));
    for c in &rec.candidates {
        out.push_str(&format!(
            "  {:<6.2} {:<12} {:>5} {:>6.0} {:>7.3} {:>6.1}\n",
            c.ratio,
            format!("{:?}", c.kind),
            c.verdict.score,
            c.impact.rpm_at_reference,
            c.impact.effective_ratio,
            c.impact.crawl_ratio
        ));
        for p in &c.verdict.pros {
            out.push_str(&format!("         + {p}\n"));
        }
        for con in &c.verdict.cons {
            out.push_str(&format!("         - {con}\n"));
        }
    }

    out
}

pub fn format_guidance(diameter_increase_in: f64, guidance: &RegearingGuidance) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "+{diameter_increase_in:.1}in diameter: {}\n  {}\n",
        guidance.label, guidance.summary
    ));
    for n in &guidance.notes {
        out.push_str(&format!("  - {n}\n"));
    }
    out
}

/// One line per parsed size.
pub fn format_tire(tire: &TireDescriptor) -> String {
    format!(
        "{:<14} {:<10} {:>6.2}in x {:>5.2}in on {}in | sidewall {:.2}in | {:?}\n",
        tire.display(),
        tire.format.display_name(),
        tire.diameter_in,
        tire.section_width_in(),
        fmt_size_number(tire.wheel_diameter_in),
        tire.sidewall_height_in,
        tire.diameter_source
    )
}

fn format_tire_line(label: &str, m: &TireMetrics) -> String {
    format!(
        "{label}: {:<14} {:.2}in dia ({:?}) | {:.2}in wide | {:.1}in circ | {:.1} rev/mi\n",
        m.display,
        m.tire.diameter_in,
        m.tire.diameter_source,
        m.tire.section_width_in(),
        m.circumference_in,
        m.revolutions_per_mile
    )
}

fn format_delta_line(label: &str, d: Delta, unit: &str) -> String {
    format!("  {label:<17} {:+8.2}{unit:<2} ({:+.2}%)\n", d.absolute, d.percentage)
}

fn format_before_after(label: &str, v: &BeforeAfter, decimals: usize) -> String {
    format!(
        "  {label:<20} {:>9.decimals$} -> {:>9.decimals$} ({:+.2}%)\n",
        v.current, v.new, v.change_percentage
    )
}

fn severity_tag(s: AdvisorySeverity) -> &'static str {
    match s {
        AdvisorySeverity::Info => "info",
        AdvisorySeverity::Caution => "caution",
        AdvisorySeverity::Warning => "WARNING",
        AdvisorySeverity::Critical => "CRITICAL",
    }
}
