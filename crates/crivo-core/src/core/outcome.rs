// crates/crivo-core/src/core/outcome.rs
// ============================================================================
// Module: Crivo Outcome Model
// Description: Per-provider outcomes, severities, and evidence metadata.
// Purpose: Represent every provider result as data, including failures.
// Dependencies: crate::core::{provider, time}, serde, serde_json
// ============================================================================

//! ## Overview
//! An outcome is the unit result of one provider evaluation. Provider
//! failures are represented as `Error` outcomes rather than raised errors so
//! that one bad data source degrades verdict quality instead of breaking the
//! request.
//! Invariants:
//! - `severity` is present iff `status` is `Fail` or `Warning`; the
//!   constructors below enforce this.
//! - `execution_time_ms` reflects the original computation, not cache reads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::provider::Priority;
use crate::core::provider::ProviderCategory;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status and Severity
// ============================================================================

/// Outcome status for one provider evaluation.
///
/// # Invariants
/// - Variants are stable for serialization and summary tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The subject passed the check.
    Pass,
    /// The subject failed the check.
    Fail,
    /// The check found a non-blocking concern.
    Warning,
    /// The check could not be evaluated.
    Error,
    /// The check does not apply to the subject.
    NotApplicable,
}

/// Severity of a failed or warning outcome.
///
/// # Invariants
/// - Ordering is ascending (`Low < Medium < High < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Minor concern.
    Low,
    /// Moderate concern.
    Medium,
    /// Serious concern; blocks compliance.
    High,
    /// Gravest concern; blocks compliance.
    Critical,
}

// ============================================================================
// SECTION: Evidence
// ============================================================================

/// Evidence backing an outcome.
///
/// # Invariants
/// - `raw` is an opaque snapshot from the data source, never interpreted by
///   the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Human-readable data source name.
    pub source_name: String,
    /// Optional public reference for the record.
    pub url: Option<String>,
    /// Optional last-update time of the underlying dataset.
    pub last_update: Option<Timestamp>,
    /// Optional raw record snapshot.
    pub raw: Option<Value>,
}

impl Evidence {
    /// Creates evidence naming only the data source.
    #[must_use]
    pub fn from_source(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            url: None,
            last_update: None,
            raw: None,
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of one provider evaluation.
///
/// # Invariants
/// - `severity` is present iff `status` is `Fail` or `Warning`.
/// - `cached` marks outcomes served from the result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Outcome status.
    pub status: CheckStatus,
    /// Severity, present only for `Fail` and `Warning`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Human-readable outcome message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Optional evidence backing the outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
    /// Wall-clock evaluation duration in milliseconds.
    pub execution_time_ms: u64,
    /// Whether the outcome was served from cache.
    pub cached: bool,
}

impl Outcome {
    /// Creates a passing outcome.
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self::bare(CheckStatus::Pass, None, message)
    }

    /// Creates a failing outcome with its severity.
    #[must_use]
    pub fn fail(severity: Severity, message: impl Into<String>) -> Self {
        Self::bare(CheckStatus::Fail, Some(severity), message)
    }

    /// Creates a warning outcome with its severity.
    #[must_use]
    pub fn warning(severity: Severity, message: impl Into<String>) -> Self {
        Self::bare(CheckStatus::Warning, Some(severity), message)
    }

    /// Creates an error outcome for a contained provider failure.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::bare(CheckStatus::Error, None, message)
    }

    /// Creates a not-applicable outcome.
    #[must_use]
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::bare(CheckStatus::NotApplicable, None, message)
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attaches evidence.
    #[must_use]
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = Some(evidence);
        self
    }

    /// Stamps the wall-clock evaluation duration.
    #[must_use]
    pub const fn with_execution_time(mut self, execution_time_ms: u64) -> Self {
        self.execution_time_ms = execution_time_ms;
        self
    }

    /// Marks the outcome as served from cache.
    #[must_use]
    pub const fn as_cached(mut self) -> Self {
        self.cached = true;
        self
    }

    /// Builds an outcome with the severity invariant already satisfied.
    fn bare(status: CheckStatus, severity: Option<Severity>, message: impl Into<String>) -> Self {
        Self {
            status,
            severity,
            message: message.into(),
            details: None,
            evidence: None,
            execution_time_ms: 0,
            cached: false,
        }
    }
}

// ============================================================================
// SECTION: Source Result
// ============================================================================

/// Outcome attributed to its provider, as returned to the caller.
///
/// # Invariants
/// - `priority` mirrors the provider metadata at evaluation time and feeds
///   the aggregation weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Provider name.
    pub provider_name: String,
    /// Provider category.
    pub category: ProviderCategory,
    /// Provider priority at evaluation time.
    pub priority: Priority,
    /// Provider outcome.
    #[serde(flatten)]
    pub outcome: Outcome,
}
