// crates/crivo-core/src/core/response.rs
// ============================================================================
// Module: Crivo Response Model
// Description: Check options, summaries, metadata, and the consolidated response.
// Purpose: Provide the stable outbound contract serialized by the request layer.
// Dependencies: crate::core::{input, outcome, time, verdict}, serde
// ============================================================================

//! ## Overview
//! The response bundles every per-source result with the consolidated verdict,
//! score, status tallies, and request metadata. The core is transport
//! agnostic; the request layer serializes this structure unchanged.
//! Invariants:
//! - `summary.total_checkers` equals `sources.len()` equals the selected
//!   provider count; no provider is silently dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::input::NormalizedInput;
use crate::core::outcome::CheckStatus;
use crate::core::outcome::SourceResult;
use crate::core::time::Timestamp;
use crate::core::verdict::Verdict;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Caller options for one check request.
///
/// # Invariants
/// - An empty `sources` list, or any entry equal to `"all"`, disables
///   provider filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Optional provider-name allow-list.
    pub sources: Vec<String>,
    /// Whether cache reads are permitted.
    pub use_cache: bool,
    /// Whether evidence payloads are included in the response.
    pub include_evidence: bool,
    /// Optional request-level timeout for the whole provider batch.
    pub timeout_ms: Option<u64>,
}

impl CheckOptions {
    /// Returns true when the allow-list leaves all providers selected.
    #[must_use]
    pub fn selects_all(&self) -> bool {
        self.sources.is_empty()
            || self.sources.iter().any(|name| name.eq_ignore_ascii_case("all"))
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            use_cache: true,
            include_evidence: true,
            timeout_ms: None,
        }
    }
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Status tallies over the per-source results.
///
/// # Invariants
/// - `total_checkers == passed + failed + warnings + errors + not_applicable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Total providers executed for the request.
    pub total_checkers: usize,
    /// Providers that passed.
    pub passed: usize,
    /// Providers that failed.
    pub failed: usize,
    /// Providers that warned.
    pub warnings: usize,
    /// Providers that errored.
    pub errors: usize,
    /// Providers not applicable to the subject.
    pub not_applicable: usize,
}

impl CheckSummary {
    /// Tallies a completed result set.
    #[must_use]
    pub fn tally(results: &[SourceResult]) -> Self {
        let mut summary = Self {
            total_checkers: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.outcome.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Error => summary.errors += 1,
                CheckStatus::NotApplicable => summary.not_applicable += 1,
            }
        }
        summary
    }
}

// ============================================================================
// SECTION: Metadata and Response
// ============================================================================

/// Response contract version reported in metadata.
pub const API_VERSION: &str = "1.0";

/// Request-processing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Orchestrator wall-clock duration in milliseconds.
    pub processing_time_ms: u64,
    /// Fraction of sources served from cache, within [0, 1].
    pub cache_hit_rate: f64,
    /// Response contract version.
    pub api_version: String,
    /// Completion timestamp.
    pub timestamp: Timestamp,
}

/// Consolidated response for one check request.
///
/// # Invariants
/// - All per-request data is created at request start and immutable once the
///   response is built; only cache entries outlive the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Unique identifier for this check execution.
    pub check_id: String,
    /// Normalized subject that was evaluated.
    pub input: NormalizedInput,
    /// Completion timestamp.
    pub timestamp: Timestamp,
    /// Consolidated verdict.
    pub verdict: Verdict,
    /// Compliance score within [0, 100].
    pub score: f64,
    /// Per-source results in presentation order.
    pub sources: Vec<SourceResult>,
    /// Status tallies.
    pub summary: CheckSummary,
    /// Request-processing metadata.
    pub metadata: ResponseMetadata,
}
