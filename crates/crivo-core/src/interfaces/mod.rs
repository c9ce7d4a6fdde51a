// crates/crivo-core/src/interfaces/mod.rs
// ============================================================================
// Module: Crivo Interfaces
// Description: Backend-agnostic interfaces for providers and the result cache.
// Purpose: Define the contract surfaces used by the Crivo runtime.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the engine integrates with compliance data sources
//! and cache backends without embedding backend-specific details. Provider
//! failures are typed so the execution wrapper can contain them; cache
//! failures degrade to miss behavior, never to request failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::InputKind;
use crate::core::NormalizedInput;
use crate::core::Outcome;
use crate::core::ProviderConfig;
use crate::core::ProviderMetadata;

// ============================================================================
// SECTION: Check Provider
// ============================================================================

/// Provider evaluation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - All variants are converted to `Error` outcomes by the execution
///   wrapper; they never surface to the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Evaluation exceeded the configured timeout.
    #[error("provider timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// Evaluation failed at runtime.
    #[error("provider runtime error: {0}")]
    Runtime(String),
    /// The underlying data source is unavailable.
    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Pluggable compliance check for one data source.
///
/// Implementations must be side-effect-free with respect to shared state
/// other than the data store they read from, must not retry internally, and
/// may take arbitrarily long; bounding the call is solely the execution
/// wrapper's concern.
#[async_trait]
pub trait CheckProvider: Send + Sync {
    /// Returns the static provider metadata.
    fn metadata(&self) -> &ProviderMetadata;

    /// Returns the static provider configuration.
    fn config(&self) -> &ProviderConfig;

    /// Evaluates the normalized subject against the provider's data source.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transient or permanent evaluation
    /// failure; the wrapper converts it to an `Error` outcome.
    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError>;
}

// ============================================================================
// SECTION: Result Cache
// ============================================================================

/// Cache key for one (input, provider) evaluation.
///
/// # Invariants
/// - Two keys are equal iff kind, canonical value, and provider name are all
///   equal; the `Display` wire form is stable for keyed backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Subject kind.
    pub kind: InputKind,
    /// Canonical subject value.
    pub canonical_value: String,
    /// Provider name.
    pub provider_name: String,
}

impl CacheKey {
    /// Builds the key for a subject/provider pair.
    #[must_use]
    pub fn for_check(input: &NormalizedInput, provider_name: impl Into<String>) -> Self {
        Self {
            kind: input.kind,
            canonical_value: input.canonical_value.clone(),
            provider_name: provider_name.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind.as_str(), self.canonical_value, self.provider_name)
    }
}

/// Result cache errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - All variants are swallowed by the execution wrapper and treated as
///   cache misses.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store is unavailable.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    /// A stored entry could not be encoded or decoded.
    #[error("cache serialization failure: {0}")]
    Serialization(String),
}

/// Result cache shared across requests.
///
/// The cache is a performance optimization, never a correctness dependency:
/// backend failures must degrade to miss behavior. Implementations must be
/// safe for concurrent access from arbitrarily many simultaneous requests;
/// at-most-stale-read semantics are acceptable.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Looks up a cached outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails; callers treat this as
    /// a miss.
    async fn get(&self, key: &CacheKey) -> Result<Option<Outcome>, CacheError>;

    /// Stores an outcome under the given TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails; callers swallow this.
    async fn set(&self, key: &CacheKey, outcome: &Outcome, ttl: Duration) -> Result<(), CacheError>;

    /// Removes every entry for a provider, returning the removed count.
    ///
    /// Called by freshness hooks after a provider's underlying dataset
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    async fn invalidate_provider(&self, provider_name: &str) -> Result<u64, CacheError>;
}

// ============================================================================
// SECTION: Noop Cache
// ============================================================================

/// Cache implementation that stores nothing.
///
/// # Invariants
/// - Every lookup misses; every store succeeds without effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResultCache;

#[async_trait]
impl ResultCache for NoopResultCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Outcome>, CacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &CacheKey,
        _outcome: &Outcome,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn invalidate_provider(&self, _provider_name: &str) -> Result<u64, CacheError> {
        Ok(0)
    }
}
