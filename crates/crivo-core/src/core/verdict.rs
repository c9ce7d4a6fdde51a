// crates/crivo-core/src/core/verdict.rs
// ============================================================================
// Module: Crivo Verdict and Score Aggregation
// Description: Deterministic fold from per-source outcomes to verdict and score.
// Purpose: Consolidate heterogeneous outcomes into one order-independent result.
// Dependencies: crate::core::outcome, serde
// ============================================================================

//! ## Overview
//! Aggregation is a pure fold over the completed outcome set. It runs only
//! after every provider slot is filled, never incrementally, so the result is
//! independent of execution completion order.
//! Invariants:
//! - Shuffling the input slice never changes verdict or score.
//! - The score is clamped to [0, 100].
//! - Severity weights are policy, not contract; callers may supply their own
//!   table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::outcome::CheckStatus;
use crate::core::outcome::Severity;
use crate::core::outcome::SourceResult;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Consolidated verdict for a check request.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// All effective checks passed.
    Compliant,
    /// At least one high or critical failure.
    NonCompliant,
    /// Failures or warnings below the blocking threshold.
    Partial,
    /// Nothing could be evaluated.
    Unknown,
}

// ============================================================================
// SECTION: Score Policy
// ============================================================================

/// Severity weight table for score penalties.
///
/// # Invariants
/// - Weights are tunable policy; the defaults are {5, 15, 30, 50} with a
///   warning factor of 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePolicy {
    /// Penalty weight for low severity.
    pub low: f64,
    /// Penalty weight for medium severity.
    pub medium: f64,
    /// Penalty weight for high severity.
    pub high: f64,
    /// Penalty weight for critical severity.
    pub critical: f64,
    /// Multiplier applied to warning penalties.
    pub warning_factor: f64,
}

impl ScorePolicy {
    /// Returns the penalty weight for a severity.
    #[must_use]
    pub const fn severity_weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            low: 5.0,
            medium: 15.0,
            high: 30.0,
            critical: 50.0,
            warning_factor: 0.5,
        }
    }
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Consolidated verdict and score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Consolidated verdict.
    pub verdict: Verdict,
    /// Compliance score within [0, 100].
    pub score: f64,
}

/// Folds a completed outcome set into a verdict and score.
///
/// The fold is order-independent: penalties are summed commutatively and the
/// verdict depends only on set membership, so shuffling `results` yields an
/// identical [`Aggregation`].
#[must_use]
pub fn aggregate(results: &[SourceResult], policy: &ScorePolicy) -> Aggregation {
    let mut effective = 0_usize;
    let mut any_fail = false;
    let mut any_warning = false;
    let mut blocking = false;
    let mut penalties = Vec::new();

    for result in results {
        let outcome = &result.outcome;
        match outcome.status {
            CheckStatus::Pass => effective += 1,
            CheckStatus::Fail => {
                effective += 1;
                any_fail = true;
                if matches!(outcome.severity, Some(Severity::High | Severity::Critical)) {
                    blocking = true;
                }
                if let Some(severity) = outcome.severity {
                    penalties.push(policy.severity_weight(severity) * result.priority.weight());
                }
            }
            CheckStatus::Warning => {
                effective += 1;
                any_warning = true;
                if let Some(severity) = outcome.severity {
                    penalties.push(
                        policy.severity_weight(severity)
                            * policy.warning_factor
                            * result.priority.weight(),
                    );
                }
            }
            CheckStatus::Error | CheckStatus::NotApplicable => {}
        }
    }

    // Summation order must not depend on input order.
    penalties.sort_by(f64::total_cmp);
    let penalty: f64 = penalties.iter().sum();

    if effective == 0 {
        return Aggregation {
            verdict: Verdict::Unknown,
            score: 0.0,
        };
    }

    let verdict = if blocking {
        Verdict::NonCompliant
    } else if any_fail || any_warning {
        Verdict::Partial
    } else {
        Verdict::Compliant
    };

    Aggregation {
        verdict,
        score: (100.0 - penalty).clamp(0.0, 100.0),
    }
}
