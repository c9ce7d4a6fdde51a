// crates/crivo-core/src/core/provider.rs
// ============================================================================
// Module: Crivo Provider Model
// Description: Provider metadata, categories, priority, and static configuration.
// Purpose: Describe each compliance data source for selection and aggregation.
// Dependencies: crate::core::input, serde, thiserror
// ============================================================================

//! ## Overview
//! Each provider evaluates one data source and carries static metadata used
//! for selection (supported kinds), presentation (category), and aggregation
//! weight (priority). Configuration is read-only at request time.
//! Invariants:
//! - Provider names are unique within a registry.
//! - Priority is always within 1..=10; higher priority counts more.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::input::InputKind;

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Compliance category for a provider.
///
/// # Invariants
/// - Variants are stable for serialization and introspection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    /// Environmental compliance sources (embargoes, deforestation).
    Environmental,
    /// Social compliance sources (labor conditions).
    Social,
    /// Legal compliance sources (sanctions, debts).
    Legal,
    /// Positive-signal sources (certifications).
    Positive,
}

impl ProviderCategory {
    /// Returns the stable wire label for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Legal => "legal",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Priority
// ============================================================================

/// Error raised for priorities outside 1..=10.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("provider priority must be within 1..=10, got {0}")]
pub struct PriorityError(pub u8);

/// Provider priority used for aggregation weight and tie-break ordering.
///
/// # Invariants
/// - Always within 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest priority.
    pub const MIN: Self = Self(1);
    /// Highest priority.
    pub const MAX: Self = Self(10);

    /// Creates a priority, returning `None` outside 1..=10.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if matches!(raw, 1..=10) {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Returns the raw priority value (always within 1..=10).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the aggregation weight (`priority / 10`).
    #[must_use]
    pub fn weight(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = PriorityError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(PriorityError(raw))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Metadata and Configuration
// ============================================================================

/// Static provider metadata.
///
/// # Invariants
/// - `name` is unique within a registry and stable for cache keys.
/// - `supported_kinds` defines applicability; an empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Unique provider name.
    pub name: String,
    /// Compliance category.
    pub category: ProviderCategory,
    /// Aggregation priority (1..=10).
    pub priority: Priority,
    /// Input kinds the provider can evaluate.
    pub supported_kinds: BTreeSet<InputKind>,
}

impl ProviderMetadata {
    /// Returns true when the provider can evaluate the given kind.
    #[must_use]
    pub fn supports(&self, kind: InputKind) -> bool {
        self.supported_kinds.contains(&kind)
    }
}

/// Per-provider static configuration, read-only at request time.
///
/// # Invariants
/// - `timeout_ms` bounds a single evaluation; enforcement belongs to the
///   execution wrapper, never to the provider itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether the provider participates in checks.
    pub enabled: bool,
    /// Cache TTL for non-error outcomes, in seconds.
    pub cache_ttl_seconds: u64,
    /// Evaluation timeout, in milliseconds.
    pub timeout_ms: u64,
}

impl ProviderConfig {
    /// Returns the evaluation timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the cache TTL as a duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_ttl_seconds: 3_600,
            timeout_ms: 5_000,
        }
    }
}
