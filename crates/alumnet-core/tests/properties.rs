//! Property tests for eligibility, progress scoring and the ledger.

#![allow(clippy::unwrap_used, clippy::panic)]

use alumnet_core::formats::{export_ledger, import_ledger};
use alumnet_core::{
    AchievementProfile, ConnectionLedger, CriteriaEvaluator, Dimension, OutcomeKind, Percent,
    TargetId,
};
use proptest::prelude::*;

fn profile() -> impl Strategy<Value = AchievementProfile> {
    (0u32..5000, 0u32..3000, 0u32..50, 0u32..1000)
        .prop_map(|(g, c, p, l)| AchievementProfile::new(g, c, p, l))
}

proptest! {
    #[test]
    fn eligibility_is_conjunction_of_dimensions(actual in profile(), required in profile()) {
        let expected = Dimension::ALL
            .iter()
            .all(|&d| actual.get(d) >= required.get(d));
        prop_assert_eq!(CriteriaEvaluator::is_eligible(&actual, &required), expected);
    }

    #[test]
    fn report_agrees_with_is_eligible(actual in profile(), required in profile()) {
        let report = CriteriaEvaluator::report(&actual, &required);
        prop_assert_eq!(
            report.is_eligible(),
            CriteriaEvaluator::is_eligible(&actual, &required)
        );
        prop_assert_eq!(report.unmet().is_empty(), report.is_eligible());
    }

    #[test]
    fn profile_is_eligible_against_itself(p in profile()) {
        prop_assert!(CriteriaEvaluator::is_eligible(&p, &p));
    }

    #[test]
    fn raising_one_threshold_above_actual_blocks(p in profile(), idx in 0usize..4) {
        let mut required = p;
        match Dimension::ALL[idx] {
            Dimension::GithubContributions => required.github_contributions += 1,
            Dimension::CodechefRating => required.codechef_rating += 1,
            Dimension::Projects => required.projects += 1,
            Dimension::LeetcodeSolved => required.leetcode_solved += 1,
        }
        prop_assert!(!CriteriaEvaluator::is_eligible(&p, &required));
    }

    #[test]
    fn progress_is_bounded(required in any::<u32>(), actual in any::<u32>()) {
        let p = CriteriaEvaluator::progress_ratio(required, actual);
        prop_assert!(p <= Percent::FULL);
    }

    #[test]
    fn progress_full_iff_threshold_met(required in 1u32..100_000, actual in 0u32..100_000) {
        let p = CriteriaEvaluator::progress_ratio(required, actual);
        prop_assert_eq!(p.is_full(), actual >= required);
    }

    #[test]
    fn progress_monotone_in_actual(required in 1u32..10_000, a in 0u32..20_000, b in 0u32..20_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            CriteriaEvaluator::progress_ratio(required, lo)
                <= CriteriaEvaluator::progress_ratio(required, hi)
        );
    }

    #[test]
    fn repeated_attempts_record_once(
        actual in profile(),
        required in profile(),
        attempts in 1usize..6,
    ) {
        let mut ledger = ConnectionLedger::new();
        let id = TargetId::new("target");
        let eligible = CriteriaEvaluator::is_eligible(&actual, &required);

        let outcomes: Vec<_> = (0..attempts)
            .map(|_| ledger.attempt_connect(&id, &actual, &required))
            .collect();

        if eligible {
            prop_assert_eq!(outcomes[0], OutcomeKind::Requested);
            prop_assert!(outcomes[1..].iter().all(|o| *o == OutcomeKind::AlreadyRequested));
            prop_assert_eq!(ledger.len(), 1);
        } else {
            prop_assert!(outcomes.iter().all(|o| *o == OutcomeKind::Ineligible));
            prop_assert!(ledger.is_empty());
        }
    }

    #[test]
    fn snapshot_restores_ledger(ids in proptest::collection::vec("[a-z0-9]{1,12}", 0..20)) {
        let ledger: ConnectionLedger = ids.into_iter().map(TargetId::new).collect();
        let bytes = export_ledger(&ledger).unwrap();
        prop_assert_eq!(import_ledger(&bytes).unwrap(), ledger);
    }
}

#[test]
fn sample_student_against_rajesh() {
    let actor = AchievementProfile::new(450, 1650, 6, 280);
    let required = AchievementProfile::new(500, 1800, 5, 300);

    assert!(!CriteriaEvaluator::is_eligible(&actor, &required));

    let report = CriteriaEvaluator::report(&actor, &required);
    let hundredths: Vec<u32> = report
        .dimensions
        .iter()
        .map(|d| d.progress.hundredths())
        .collect();
    assert_eq!(hundredths, vec![9000, 9167, 10_000, 9333]);
    assert_eq!(report.unmet().len(), 3);
}
