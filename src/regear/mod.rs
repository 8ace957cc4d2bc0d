//! Re-gear recommendations.
//!
//! Two target ratios are derived for the new tire:
//!
//! - restoration: `current × new_d / old_d`, which puts the effective ratio
//!   back where it was
//! - optimal: the axle ratio whose new-tire cruise RPM at 65 mph lands on the
//!   use case's target; torque-priority profiles also require
//!   `axle ≥ min_crawl / (transfer_low × first)` and take the larger
//!
//! The two nearest catalog ratios to each target become candidates, scored
//! against the target RPM and the profile's priority. Candidate RPM uses the
//! same new-tire convention as the comparison's drivetrain impact, so the
//! current ratio scores at exactly the RPM the comparison reports.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compare::ComparisonResult;
use crate::data::{GearPriority, ReferenceData, UseCaseProfile};
use crate::domain::{DrivetrainConfig, IntendedUse};
use crate::error::{CalcError, require_positive};
use crate::math::{
    REFERENCE_SPEED_MPH, axle_ratio_for_cruise_rpm, cruise_rpm_on_new_tire, effective_ratio, engine_rpm,
    restoration_ratio,
};

pub mod guidance;

pub use guidance::{RegearingGuidance, regearing_guidance};

/// Catalog neighbours taken per target ratio.
const NEAREST_PER_TARGET: usize = 2;

const BASE_SCORE: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Restoration,
    Optimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NecessityLevel {
    Optional,
    Consider,
    Recommended,
    StronglyRecommended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Necessity {
    pub level: NecessityLevel,
    pub reason: String,
}

impl Necessity {
    /// Driven only by the size of the diameter change.
    pub fn from_diameter_change(diameter_change_pct: f64) -> Self {
        let pct = diameter_change_pct.abs();
        let (level, reason) = if pct > 10.0 {
            (
                NecessityLevel::StronglyRecommended,
                format!("{pct:.1}% diameter change: performance loss and drivetrain strain are significant."),
            )
        } else if pct > 5.0 {
            (
                NecessityLevel::Recommended,
                format!("{pct:.1}% diameter change: expect noticeably softer acceleration and more downshifting."),
            )
        } else if pct > 3.0 {
            (
                NecessityLevel::Consider,
                format!("{pct:.1}% diameter change: mild effect, worth it if you tow or climb often."),
            )
        } else {
            (
                NecessityLevel::Optional,
                format!("{pct:.1}% diameter change: within normal tolerance."),
            )
        };
        Self { level, reason }
    }
}

/// How a candidate ratio behaves on the new tire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateImpact {
    pub rpm_at_reference: f64,
    /// Versus the current ratio on the current tire.
    pub rpm_change_from_original: f64,
    /// Candidate ratio as felt on the new tire, in current-tire terms.
    pub effective_ratio: f64,
    pub crawl_ratio: f64,
    /// Distance from the restoration ratio, in percent.
    pub restoration_gap_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// `0..=100`
    pub score: u8,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegearCandidate {
    pub ratio: f64,
    pub kind: CandidateKind,
    pub impact: CandidateImpact,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegearRecommendation {
    pub current_ratio: f64,
    pub intended_use: IntendedUse,
    pub priority: GearPriority,
    pub target_rpm: f64,
    pub reference_speed_mph: f64,
    pub original_rpm: f64,
    pub restoration_ratio: f64,
    pub optimal_ratio: f64,
    pub necessity: Necessity,
    /// Best first. Empty when the catalog is empty.
    pub candidates: Vec<RegearCandidate>,
}

impl RegearRecommendation {
    pub fn best(&self) -> Option<&RegearCandidate> {
        self.candidates.first()
    }
}

pub fn recommend_regear(
    result: &ComparisonResult,
    current_ratio: f64,
    intended_use: IntendedUse,
    drivetrain: &DrivetrainConfig,
    reference: &ReferenceData,
) -> Result<RegearRecommendation, CalcError> {
    let current_ratio = require_positive("current gear ratio", current_ratio)?;
    drivetrain.validate()?;
    let old_d = require_positive("current diameter", result.current.tire.diameter_in)?;
    let new_d = require_positive("new diameter", result.new.tire.diameter_in)?;

    let profile = reference.profile(intended_use);
    let trans = drivetrain.transmission_top_gear_ratio;

    let restoration = restoration_ratio(current_ratio, old_d, new_d);
    let optimal = optimal_ratio(&profile, drivetrain, old_d, new_d);
    let original_rpm = engine_rpm(REFERENCE_SPEED_MPH, current_ratio, trans, old_d);

    if reference.gear_catalog.is_empty() {
        warn!("gear catalog is empty; no re-gear candidates");
    }

    let ctx = ScoringContext {
        profile,
        drivetrain,
        old_d,
        new_d,
        current_ratio,
        original_rpm,
        restoration,
    };

    let mut candidates: Vec<RegearCandidate> = Vec::new();
    for (kind, target) in [(CandidateKind::Restoration, restoration), (CandidateKind::Optimal, optimal)] {
        for ratio in nearest_ratios(&reference.gear_catalog, target, NEAREST_PER_TARGET) {
            if candidates.iter().any(|c| c.ratio == ratio) {
                continue;
            }
            candidates.push(ctx.candidate(ratio, kind));
        }
    }
    candidates.sort_by(|a, b| {
        b.verdict
            .score
            .cmp(&a.verdict.score)
            .then(b.ratio.total_cmp(&a.ratio))
    });

    debug!(
        restoration,
        optimal,
        candidates = candidates.len(),
        use_case = intended_use.key(),
        "re-gear candidates scored"
    );

    Ok(RegearRecommendation {
        current_ratio,
        intended_use,
        priority: profile.priority,
        target_rpm: profile.target_rpm,
        reference_speed_mph: REFERENCE_SPEED_MPH,
        original_rpm,
        restoration_ratio: restoration,
        optimal_ratio: optimal,
        necessity: Necessity::from_diameter_change(result.differences.diameter.percentage),
        candidates,
    })
}

/// Ratio that hits the profile's target RPM on the new tire; torque-priority
/// profiles also honour their minimum crawl ratio.
pub fn optimal_ratio(
    profile: &UseCaseProfile,
    drivetrain: &DrivetrainConfig,
    current_diameter_in: f64,
    new_diameter_in: f64,
) -> f64 {
    let by_rpm = axle_ratio_for_cruise_rpm(
        profile.target_rpm,
        REFERENCE_SPEED_MPH,
        drivetrain.transmission_top_gear_ratio,
        current_diameter_in,
        new_diameter_in,
    );
    match profile.min_crawl_ratio {
        Some(min_crawl) if profile.priority.is_torque_priority() => {
            let by_crawl = min_crawl / (drivetrain.transfer_case_low_ratio * drivetrain.first_gear_ratio);
            by_rpm.max(by_crawl)
        }
        _ => by_rpm,
    }
}

/// Up to `n` catalog entries closest to `target`; on equal distance the lower ratio comes first.
pub fn nearest_ratios(catalog: &[f64], target: f64, n: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = catalog.iter().copied().filter(|r| r.is_finite() && *r > 0.0).collect();
    sorted.sort_by(|a, b| {
        (a - target)
            .abs()
            .total_cmp(&(b - target).abs())
            .then(a.total_cmp(b))
    });
    sorted.truncate(n);
    sorted
}

struct ScoringContext<'a> {
    profile: UseCaseProfile,
    drivetrain: &'a DrivetrainConfig,
    old_d: f64,
    new_d: f64,
    current_ratio: f64,
    original_rpm: f64,
    restoration: f64,
}

impl ScoringContext<'_> {
    fn candidate(&self, ratio: f64, kind: CandidateKind) -> RegearCandidate {
        let rpm = cruise_rpm_on_new_tire(
            REFERENCE_SPEED_MPH,
            ratio,
            self.drivetrain.transmission_top_gear_ratio,
            self.old_d,
            self.new_d,
        );
        let impact = CandidateImpact {
            rpm_at_reference: rpm,
            rpm_change_from_original: rpm - self.original_rpm,
            effective_ratio: effective_ratio(ratio, self.old_d, self.new_d),
            crawl_ratio: self.drivetrain.crawl_ratio(ratio),
            restoration_gap_pct: (ratio - self.restoration) / self.restoration * 100.0,
        };
        RegearCandidate {
            ratio,
            kind,
            verdict: self.verdict(&impact),
            impact,
        }
    }

    fn verdict(&self, impact: &CandidateImpact) -> Verdict {
        let mut score = BASE_SCORE;
        let mut pros = Vec::new();
        let mut cons = Vec::new();
        let target = self.profile.target_rpm;
        let off = impact.rpm_at_reference - target;

        if off.abs() <= 100.0 {
            score += 30;
            pros.push(format!("Cruise RPM {:.0} is on target ({target:.0})", impact.rpm_at_reference));
        } else if off.abs() <= 200.0 {
            score += 20;
            pros.push(format!("Cruise RPM {:.0} is close to target ({target:.0})", impact.rpm_at_reference));
        } else if off.abs() > 400.0 {
            score -= 20;
            cons.push(format!(
                "Cruise RPM {:.0} is {:.0} {} target",
                impact.rpm_at_reference,
                off.abs(),
                if off > 0.0 { "above" } else { "below" }
            ));
        }

        match self.profile.priority {
            GearPriority::FuelEconomy => {
                if impact.rpm_at_reference <= target {
                    score += 10;
                    pros.push("Low cruise RPM favours fuel economy".to_string());
                } else if off > 200.0 {
                    score -= 10;
                    cons.push("Higher cruise RPM costs fuel economy".to_string());
                }
            }
            GearPriority::Balanced => {
                if impact.restoration_gap_pct.abs() <= 2.0 {
                    score += 15;
                    pros.push("Restores factory-like gearing".to_string());
                } else if impact.restoration_gap_pct.abs() > 5.0 {
                    score -= 5;
                    cons.push(format!(
                        "{:+.1}% away from restoring original gearing",
                        impact.restoration_gap_pct
                    ));
                }
            }
            GearPriority::Acceleration => {
                if impact.restoration_gap_pct >= 0.0 {
                    score += 10;
                    pros.push("At or beyond restoration: acceleration with loaded gear is preserved".to_string());
                } else {
                    score -= 10;
                    cons.push("Shorter than restoration: loaded acceleration stays soft".to_string());
                }
            }
            GearPriority::CrawlRatio => {
                let min_crawl = self.profile.min_crawl_ratio.unwrap_or_default();
                if impact.crawl_ratio >= min_crawl {
                    score += 25;
                    pros.push(format!("Crawl ratio {:.1}:1 meets the {min_crawl:.0}:1 minimum", impact.crawl_ratio));
                } else {
                    score -= 20;
                    cons.push(format!("Crawl ratio {:.1}:1 is below {min_crawl:.0}:1", impact.crawl_ratio));
                }
            }
        }

        if impact.effective_ratio < self.current_ratio * 0.95 {
            cons.push("Effective gearing stays noticeably taller than stock".to_string());
        }

        Verdict {
            score: score.clamp(0, 100) as u8,
            pros,
            cons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_sizes;
    use crate::domain::ComparisonOptions;
    use approx::assert_abs_diff_eq;

    fn drivetrain() -> DrivetrainConfig {
        DrivetrainConfig {
            axle_gear_ratio: Some(3.909),
            transmission_top_gear_ratio: 0.85,
            ..DrivetrainConfig::default()
        }
    }

    fn comparison(a: &str, b: &str) -> ComparisonResult {
        let options = ComparisonOptions {
            drivetrain: drivetrain(),
            ..ComparisonOptions::default()
        };
        compare_sizes(a, b, &options, &ReferenceData::builtin()).unwrap()
    }

    #[test]
    fn restoration_and_optimal_targets() {
        let r = recommend_regear(
            &comparison("265/70R17", "285/75R17"),
            3.909,
            IntendedUse::WeekendTrail,
            &drivetrain(),
            &ReferenceData::builtin(),
        )
        .unwrap();
        // 3.909 × 32.8 / 31.6
        assert_abs_diff_eq!(r.restoration_ratio, 4.0574, epsilon = 1e-3);
        // 2300 × 32.8 / (65 × 0.85 × 336) × 32.8 / 31.6
        assert_abs_diff_eq!(r.optimal_ratio, 4.2181, epsilon = 1e-3);
        let ratios: Vec<f64> = r.candidates.iter().map(|c| c.ratio).collect();
        assert_eq!(ratios.len(), 3);
        assert!(ratios.contains(&4.10) && ratios.contains(&3.91) && ratios.contains(&4.30));
        let kind_of = |ratio: f64| r.candidates.iter().find(|c| c.ratio == ratio).map(|c| c.kind);
        assert_eq!(kind_of(4.10), Some(CandidateKind::Restoration));
        assert_eq!(kind_of(4.30), Some(CandidateKind::Optimal));
        assert_eq!(r.best().unwrap().ratio, 4.10);
        assert_eq!(r.best().unwrap().verdict.score, 95);
        assert_eq!(r.necessity.level, NecessityLevel::Consider);
    }

    #[test]
    fn rock_crawling_enforces_crawl_minimum() {
        let r = recommend_regear(
            &comparison("265/70R17", "285/75R17"),
            3.909,
            IntendedUse::RockCrawling,
            &drivetrain(),
            &ReferenceData::builtin(),
        )
        .unwrap();
        // 50 / (2.5 × 4.0) beats the RPM-derived 4.58
        assert_abs_diff_eq!(r.optimal_ratio, 5.0, epsilon = 1e-9);
        let optimal: Vec<f64> = r
            .candidates
            .iter()
            .filter(|c| c.kind == CandidateKind::Optimal)
            .map(|c| c.ratio)
            .collect();
        assert!(optimal.contains(&4.88) && optimal.contains(&5.13));
        assert_eq!(r.best().unwrap().ratio, 5.13);
    }

    #[test]
    fn candidates_sorted_by_score_then_ratio() {
        let r = recommend_regear(
            &comparison("225/75R16", "35x12.50R17"),
            3.73,
            IntendedUse::Overland,
            &drivetrain(),
            &ReferenceData::builtin(),
        )
        .unwrap();
        for pair in r.candidates.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.verdict.score > b.verdict.score || (a.verdict.score == b.verdict.score && a.ratio > b.ratio));
        }
        let mut ratios: Vec<f64> = r.candidates.iter().map(|c| c.ratio).collect();
        ratios.sort_by(f64::total_cmp);
        ratios.dedup();
        assert_eq!(ratios.len(), r.candidates.len());
        assert_eq!(r.necessity.level, NecessityLevel::StronglyRecommended);
    }

    #[test]
    fn current_ratio_candidate_matches_comparison_rpm() {
        let result = comparison("265/70R17", "285/75R17");
        let impact = result.drivetrain_impact.unwrap();
        let reference = ReferenceData {
            gear_catalog: vec![3.909],
            ..ReferenceData::builtin()
        };
        let r = recommend_regear(&result, 3.909, IntendedUse::DailyDriver, &drivetrain(), &reference).unwrap();
        assert_abs_diff_eq!(r.original_rpm, impact.rpm_at_reference_speed.current, epsilon = 1e-9);
        let candidate = r.best().unwrap();
        assert_abs_diff_eq!(
            candidate.impact.rpm_at_reference,
            impact.rpm_at_reference_speed.new,
            epsilon = 1e-9
        );
    }

    #[test]
    fn optimal_ratio_lands_on_target_rpm() {
        let profile = ReferenceData::builtin().profile(IntendedUse::DailyDriver);
        let ratio = optimal_ratio(&profile, &drivetrain(), 31.6, 32.8);
        let rpm = cruise_rpm_on_new_tire(REFERENCE_SPEED_MPH, ratio, 0.85, 31.6, 32.8);
        assert_abs_diff_eq!(rpm, profile.target_rpm, epsilon = 1e-9);
    }

    #[test]
    fn empty_catalog_degrades_to_no_candidates() {
        let r = recommend_regear(
            &comparison("265/70R17", "285/75R17"),
            3.909,
            IntendedUse::DailyDriver,
            &drivetrain(),
            &ReferenceData::empty(),
        )
        .unwrap();
        assert!(r.candidates.is_empty());
        assert!(r.best().is_none());
        assert!(r.restoration_ratio > 3.909);
    }

    #[test]
    fn nearest_ratios_breaks_ties_low() {
        assert_eq!(nearest_ratios(&[3.5, 4.5, 5.0], 4.0, 2), vec![3.5, 4.5]);
        assert_eq!(nearest_ratios(&[3.73, 4.10], 4.0, 5), vec![4.10, 3.73]);
        assert!(nearest_ratios(&[], 4.0, 2).is_empty());
    }

    #[test]
    fn necessity_thresholds() {
        assert_eq!(Necessity::from_diameter_change(3.0).level, NecessityLevel::Optional);
        assert_eq!(Necessity::from_diameter_change(-3.5).level, NecessityLevel::Consider);
        assert_eq!(Necessity::from_diameter_change(5.1).level, NecessityLevel::Recommended);
        assert_eq!(Necessity::from_diameter_change(10.1).level, NecessityLevel::StronglyRecommended);
    }

    #[test]
    fn rejects_bad_current_ratio() {
        let err = recommend_regear(
            &comparison("265/70R17", "285/75R17"),
            0.0,
            IntendedUse::DailyDriver,
            &drivetrain(),
            &ReferenceData::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(_)));
    }
}
