// crates/crivo-core/tests/aggregation.rs
// ============================================================================
// Module: Aggregation Tests
// Description: Verdict and score consolidation over per-source outcomes.
// Purpose: Ensure the fold is deterministic, order-independent, and clamped.
// ============================================================================

//! Aggregation tests covering the verdict rules, the scoring fold, and its
//! order-independence and clamping properties.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use crivo_core::CheckStatus;
use crivo_core::Outcome;
use crivo_core::Priority;
use crivo_core::ProviderCategory;
use crivo_core::ScorePolicy;
use crivo_core::Severity;
use crivo_core::SourceResult;
use crivo_core::Verdict;
use crivo_core::aggregate;
use proptest::prelude::*;

/// Builds a source result from a name, priority, and outcome.
fn result(name: &str, priority: u8, outcome: Outcome) -> SourceResult {
    SourceResult {
        provider_name: name.to_string(),
        category: ProviderCategory::Legal,
        priority: Priority::new(priority).unwrap(),
        outcome,
    }
}

#[test]
fn critical_failure_blocks_and_halves_the_score() {
    let results = vec![
        result("sanctions", 10, Outcome::fail(Severity::Critical, "listed")),
        result("organic", 8, Outcome::pass("certified")),
    ];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::NonCompliant);
    assert!((aggregation.score - 50.0).abs() < f64::EPSILON);
}

#[test]
fn all_passing_sources_are_compliant_with_full_score() {
    let results = vec![
        result("sanctions", 10, Outcome::pass("clear")),
        result("embargo", 9, Outcome::pass("clear")),
        result("labor", 8, Outcome::pass("clear")),
    ];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::Compliant);
    assert!((aggregation.score - 100.0).abs() < f64::EPSILON);
}

#[test]
fn no_effective_sources_yield_unknown_with_zero_score() {
    let results = vec![
        result("sanctions", 10, Outcome::not_applicable("unsupported kind")),
        result("embargo", 9, Outcome::not_applicable("unsupported kind")),
    ];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::Unknown);
    assert!((aggregation.score).abs() < f64::EPSILON);
}

#[test]
fn errors_alone_also_yield_unknown() {
    let results = vec![result("sanctions", 10, Outcome::error("source down"))];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::Unknown);
}

#[test]
fn medium_failure_at_half_weight_scores_ninety_two_and_a_half() {
    let results = vec![result("debts", 5, Outcome::fail(Severity::Medium, "open debts"))];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::Partial);
    assert!((aggregation.score - 92.5).abs() < f64::EPSILON);
}

#[test]
fn warnings_are_penalized_at_the_warning_factor() {
    let results = vec![
        result("deforestation", 7, Outcome::warning(Severity::Medium, "alerts nearby")),
    ];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::Partial);
    // 100 - 15 * 0.5 * 0.7
    assert!((aggregation.score - 94.75).abs() < 1e-9);
}

#[test]
fn high_severity_failure_is_blocking_even_at_low_priority() {
    let results = vec![result("embargo", 1, Outcome::fail(Severity::High, "embargoed"))];
    let aggregation = aggregate(&results, &ScorePolicy::default());
    assert_eq!(aggregation.verdict, Verdict::NonCompliant);
}

#[test]
fn score_never_improves_when_severity_rises() {
    let policy = ScorePolicy::default();
    let severities = [Severity::Low, Severity::Medium, Severity::High, Severity::Critical];
    let scores: Vec<f64> = severities
        .iter()
        .map(|severity| {
            let results = vec![result("source", 10, Outcome::fail(*severity, "hit"))];
            aggregate(&results, &policy).score
        })
        .collect();
    for pair in scores.windows(2) {
        assert!(pair[1] <= pair[0], "score must not rise with severity: {scores:?}");
    }
}

/// Strategy over arbitrary source results.
fn arb_result() -> impl Strategy<Value = SourceResult> {
    let status = prop_oneof![
        Just(CheckStatus::Pass),
        Just(CheckStatus::Fail),
        Just(CheckStatus::Warning),
        Just(CheckStatus::Error),
        Just(CheckStatus::NotApplicable),
    ];
    let severity = prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ];
    (status, severity, 1_u8..=10, "[a-z]{3,12}").prop_map(|(status, severity, priority, name)| {
        let outcome = match status {
            CheckStatus::Pass => Outcome::pass("ok"),
            CheckStatus::Fail => Outcome::fail(severity, "hit"),
            CheckStatus::Warning => Outcome::warning(severity, "concern"),
            CheckStatus::Error => Outcome::error("broken"),
            CheckStatus::NotApplicable => Outcome::not_applicable("skip"),
        };
        result(&name, priority, outcome)
    })
}

proptest! {
    #[test]
    fn aggregation_is_order_independent(
        results in proptest::collection::vec(arb_result(), 0..12),
        seed in any::<u64>(),
    ) {
        let baseline = aggregate(&results, &ScorePolicy::default());

        // Deterministic shuffle driven by the seed.
        let mut shuffled = results;
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            #[allow(clippy::cast_possible_truncation, reason = "Modulo bounds the value.")]
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        let reordered = aggregate(&shuffled, &ScorePolicy::default());
        prop_assert_eq!(baseline.verdict, reordered.verdict);
        prop_assert_eq!(baseline.score.to_bits(), reordered.score.to_bits());
    }

    #[test]
    fn score_is_always_within_bounds(
        results in proptest::collection::vec(arb_result(), 0..24),
    ) {
        let aggregation = aggregate(&results, &ScorePolicy::default());
        prop_assert!((0.0..=100.0).contains(&aggregation.score));
    }
}
