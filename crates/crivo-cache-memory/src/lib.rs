// crates/crivo-cache-memory/src/lib.rs
// ============================================================================
// Module: Crivo Memory Cache
// Description: In-process TTL result cache backed by a concurrent map.
// Purpose: Provide the default cache backend for single-process deployments.
// Dependencies: crivo-core, async-trait, dashmap, tokio, tracing
// ============================================================================

//! ## Overview
//! The memory cache stores provider outcomes keyed by (kind, canonical value,
//! provider) with a per-entry expiry. Expired entries are dropped on read;
//! a periodic sweep is optional, not required for correctness.
//! Invariants:
//! - A read never returns an expired entry.
//! - `invalidate_provider` removes every entry for the named provider and
//!   reports the removed count.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use crivo_core::interfaces::CacheError;
use crivo_core::interfaces::CacheKey;
use crivo_core::interfaces::ResultCache;
use crivo_core::Outcome;

// ============================================================================
// SECTION: Entry
// ============================================================================

/// One stored outcome with its expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Cached provider outcome.
    outcome: Outcome,
    /// Owning provider, for targeted invalidation.
    provider_name: String,
    /// Expiry instant; entries at or past it are dead.
    expires_at: Instant,
}

impl CacheEntry {
    /// Returns true when the entry is past its expiry.
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ============================================================================
// SECTION: Memory Cache
// ============================================================================

/// In-process TTL cache over provider outcomes.
///
/// # Invariants
/// - Entries past their expiry are never returned; they are removed on the
///   read that observes them.
#[derive(Debug, Default)]
pub struct MemoryResultCache {
    /// Stored entries keyed by (kind, canonical value, provider).
    entries: DashMap<CacheKey, CacheEntry>,
}

impl MemoryResultCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored entry count, including not-yet-swept expired
    /// entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry, returning the removed count.
    pub fn purge_expired(&self) -> u64 {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = u64::try_from(before.saturating_sub(self.entries.len())).unwrap_or(u64::MAX);
        if removed > 0 {
            tracing::debug!(removed, "purged expired cache entries");
        }
        removed
    }
}

#[async_trait]
impl ResultCache for MemoryResultCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Outcome>, CacheError> {
        let now = Instant::now();
        // The read guard must be dropped before removal touches the shard.
        let hit = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| entry.outcome.clone()));
        match hit {
            Some(None) => {
                self.entries.remove(key);
                Ok(None)
            }
            Some(live) => Ok(live),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &CacheKey, outcome: &Outcome, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Ok(());
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                outcome: outcome.clone(),
                provider_name: key.provider_name.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate_provider(&self, provider_name: &str) -> Result<u64, CacheError> {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.provider_name != provider_name);
        let removed = u64::try_from(before.saturating_sub(self.entries.len())).unwrap_or(u64::MAX);
        tracing::info!(provider = provider_name, removed, "invalidated cached outcomes");
        Ok(removed)
    }
}
