//! # Criteria Module
//!
//! Eligibility gating and progress scoring.
//!
//! Eligibility is purely conjunctive: an actor must reach every threshold.
//! Progress is reported per dimension as a bounded percentage, stored in
//! hundredths of a percent so no float arithmetic is involved.

use crate::primitives::FULL_PROGRESS;
use crate::{AchievementProfile, Dimension};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PERCENT
// =============================================================================

/// A percentage in `[0, 100]` with two decimal places.
///
/// Stored as hundredths of a percent (`0..=10_000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(u32);

impl Percent {
    /// 0.00%
    pub const ZERO: Percent = Percent(0);

    /// 100.00%
    pub const FULL: Percent = Percent(FULL_PROGRESS);

    /// Create from hundredths of a percent, clamped to 100.00%.
    #[must_use]
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths.min(FULL_PROGRESS))
    }

    /// Value in hundredths of a percent (`9167` means 91.67%).
    #[must_use]
    pub fn hundredths(self) -> u32 {
        self.0
    }

    /// Whole-percent part, truncated (`91.67` gives `91`).
    #[must_use]
    pub fn whole(self) -> u8 {
        (self.0 / 100) as u8
    }

    /// Whether this is 100.00%.
    #[must_use]
    pub fn is_full(self) -> bool {
        self.0 == FULL_PROGRESS
    }

    /// Floating-point view for presentation layers (progress bars).
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// Stateless evaluator of connection criteria.
///
/// Safe to call from any thread without synchronization.
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    /// True iff `actual` meets or exceeds `required` on every dimension.
    #[must_use]
    pub fn is_eligible(actual: &AchievementProfile, required: &AchievementProfile) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| actual.get(d) >= required.get(d))
    }

    /// Progress toward one threshold: `min(actual / required * 100, 100)`.
    ///
    /// Rounded half-up to hundredths of a percent, but never to 100% while
    /// `actual` is still short of `required`. A zero threshold is trivially
    /// satisfied and yields 100%.
    #[must_use]
    pub fn progress_ratio(required_value: u32, actual_value: u32) -> Percent {
        if required_value == 0 {
            return Percent::FULL;
        }

        let required = u64::from(required_value);
        let scaled = u64::from(actual_value)
            .saturating_mul(u64::from(FULL_PROGRESS))
            .saturating_add(required / 2);
        let cap = if actual_value < required_value {
            FULL_PROGRESS - 1
        } else {
            FULL_PROGRESS
        };
        let hundredths = (scaled / required).min(u64::from(cap));

        Percent::from_hundredths(hundredths as u32)
    }

    /// Full per-dimension report of `actual` against `required`.
    #[must_use]
    pub fn report(actual: &AchievementProfile, required: &AchievementProfile) -> CriteriaReport {
        let dimensions = Dimension::ALL
            .iter()
            .map(|&dimension| {
                let actual = actual.get(dimension);
                let required = required.get(dimension);
                DimensionProgress {
                    dimension,
                    actual,
                    required,
                    met: actual >= required,
                    progress: Self::progress_ratio(required, actual),
                }
            })
            .collect();

        CriteriaReport { dimensions }
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Standing on a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionProgress {
    pub dimension: Dimension,
    pub actual: u32,
    pub required: u32,
    pub met: bool,
    pub progress: Percent,
}

/// Standing on every dimension, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaReport {
    pub dimensions: Vec<DimensionProgress>,
}

impl CriteriaReport {
    /// Agrees with [`CriteriaEvaluator::is_eligible`] for the same inputs.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.dimensions.iter().all(|d| d.met)
    }

    /// Dimensions whose threshold is not reached.
    #[must_use]
    pub fn unmet(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter(|d| !d.met)
            .map(|d| d.dimension)
            .collect()
    }

    /// Progress on one dimension.
    #[must_use]
    pub fn progress(&self, dimension: Dimension) -> Option<Percent> {
        self.dimensions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.progress)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ACTOR: AchievementProfile = AchievementProfile::new(450, 1650, 6, 280);
    const RAJESH: AchievementProfile = AchievementProfile::new(500, 1800, 5, 300);

    #[test]
    fn eligible_when_every_threshold_met() {
        let actual = AchievementProfile::new(500, 1800, 6, 300);
        assert!(CriteriaEvaluator::is_eligible(&actual, &RAJESH));
    }

    #[test]
    fn single_failing_dimension_blocks() {
        let actual = AchievementProfile::new(500, 1800, 5, 300);
        let required = AchievementProfile::new(500, 1800, 6, 300);
        assert!(!CriteriaEvaluator::is_eligible(&actual, &required));
    }

    #[test]
    fn zero_thresholds_always_eligible() {
        let zero = AchievementProfile::default();
        assert!(CriteriaEvaluator::is_eligible(&zero, &zero));
    }

    #[test]
    fn progress_below_threshold() {
        let p = CriteriaEvaluator::progress_ratio(500, 450);
        assert_eq!(p.hundredths(), 9000);
        assert_eq!(p.to_string(), "90.00");
    }

    #[test]
    fn progress_clamps_at_full() {
        assert_eq!(CriteriaEvaluator::progress_ratio(500, 600), Percent::FULL);
        assert_eq!(CriteriaEvaluator::progress_ratio(5, 6), Percent::FULL);
    }

    #[test]
    fn progress_zero_threshold_is_full() {
        assert_eq!(CriteriaEvaluator::progress_ratio(0, 0), Percent::FULL);
        assert_eq!(CriteriaEvaluator::progress_ratio(0, 12345), Percent::FULL);
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(CriteriaEvaluator::progress_ratio(1800, 1650).to_string(), "91.67");
        assert_eq!(CriteriaEvaluator::progress_ratio(300, 280).to_string(), "93.33");
        assert_eq!(CriteriaEvaluator::progress_ratio(3, 1).to_string(), "33.33");
        assert_eq!(CriteriaEvaluator::progress_ratio(3, 2).to_string(), "66.67");
    }

    #[test]
    fn progress_handles_extreme_values() {
        assert_eq!(
            CriteriaEvaluator::progress_ratio(u32::MAX, u32::MAX),
            Percent::FULL
        );
        assert_eq!(CriteriaEvaluator::progress_ratio(u32::MAX, 0), Percent::ZERO);
    }

    #[test]
    fn progress_short_of_threshold_is_never_full() {
        let p = CriteriaEvaluator::progress_ratio(100_000, 99_999);
        assert_eq!(p.hundredths(), 9999);
        assert!(!p.is_full());

        let report = CriteriaEvaluator::report(
            &AchievementProfile::new(99_999, 0, 0, 0),
            &AchievementProfile::new(100_000, 0, 0, 0),
        );
        assert!(!report.is_eligible());
        assert_eq!(
            report.progress(Dimension::GithubContributions),
            Some(Percent::from_hundredths(9999))
        );
    }

    #[test]
    fn end_to_end_report() {
        let report = CriteriaEvaluator::report(&ACTOR, &RAJESH);

        assert!(!report.is_eligible());
        assert!(!CriteriaEvaluator::is_eligible(&ACTOR, &RAJESH));
        assert_eq!(
            report.unmet(),
            vec![
                Dimension::GithubContributions,
                Dimension::CodechefRating,
                Dimension::LeetcodeSolved,
            ]
        );

        let rendered: Vec<String> = report
            .dimensions
            .iter()
            .map(|d| d.progress.to_string())
            .collect();
        assert_eq!(rendered, vec!["90.00", "91.67", "100.00", "93.33"]);
    }

    #[test]
    fn report_lookup_by_dimension() {
        let report = CriteriaEvaluator::report(&ACTOR, &RAJESH);
        assert_eq!(report.progress(Dimension::Projects), Some(Percent::FULL));
    }

    #[test]
    fn percent_whole_truncates() {
        assert_eq!(Percent::from_hundredths(9167).whole(), 91);
        assert_eq!(Percent::from_hundredths(20_000), Percent::FULL);
    }
}
