// crates/crivo-cache-memory/tests/cache.rs
// ============================================================================
// Module: Memory Cache Tests
// Description: TTL expiry, invalidation, and cache-hit behavior end to end.
// Purpose: Ensure cached outcomes are reused within TTL and dropped after it.
// ============================================================================

//! Memory cache tests using the paused tokio clock for deterministic TTLs.

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

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use crivo_cache_memory::MemoryResultCache;
use crivo_core::CheckInput;
use crivo_core::CheckOptions;
use crivo_core::CheckProvider;
use crivo_core::InputKind;
use crivo_core::NormalizedInput;
use crivo_core::Orchestrator;
use crivo_core::Outcome;
use crivo_core::Priority;
use crivo_core::ProviderCategory;
use crivo_core::ProviderConfig;
use crivo_core::ProviderError;
use crivo_core::ProviderMetadata;
use crivo_core::ProviderRegistry;
use crivo_core::RawValue;
use crivo_core::interfaces::CacheKey;
use crivo_core::interfaces::ResultCache;

/// Provider that counts evaluations.
struct CountingProvider {
    metadata: ProviderMetadata,
    config: ProviderConfig,
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    fn new(name: &str, cache_ttl_seconds: u64, calls: Arc<AtomicUsize>) -> Arc<Self> {
        Arc::new(Self {
            metadata: ProviderMetadata {
                name: name.to_string(),
                category: ProviderCategory::Legal,
                priority: Priority::new(5).unwrap(),
                supported_kinds: BTreeSet::from([InputKind::TaxIdPj]),
            },
            config: ProviderConfig {
                cache_ttl_seconds,
                ..ProviderConfig::default()
            },
            calls,
        })
    }
}

#[async_trait]
impl CheckProvider for CountingProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, _input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Outcome::pass("clear"))
    }
}

/// Key used by the direct backend tests.
fn key(provider: &str, value: &str) -> CacheKey {
    CacheKey {
        kind: InputKind::TaxIdPj,
        canonical_value: value.to_string(),
        provider_name: provider.to_string(),
    }
}

/// Valid corporate tax-id input.
fn pj_input() -> CheckInput {
    CheckInput {
        kind: InputKind::TaxIdPj,
        value: RawValue::Text("12345678000195".to_string()),
    }
}

#[tokio::test(start_paused = true)]
async fn entries_expire_after_their_ttl() {
    let cache = MemoryResultCache::new();
    let outcome = Outcome::pass("clear");
    cache.set(&key("sanctions", "123"), &outcome, Duration::from_secs(60)).await.unwrap();

    assert!(cache.get(&key("sanctions", "123")).await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(cache.get(&key("sanctions", "123")).await.unwrap().is_none());
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn zero_ttl_stores_nothing() {
    let cache = MemoryResultCache::new();
    let outcome = Outcome::pass("clear");
    cache.set(&key("sanctions", "123"), &outcome, Duration::ZERO).await.unwrap();
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalidation_removes_only_the_named_provider() {
    let cache = MemoryResultCache::new();
    let outcome = Outcome::pass("clear");
    let ttl = Duration::from_secs(3_600);
    cache.set(&key("sanctions", "a"), &outcome, ttl).await.unwrap();
    cache.set(&key("sanctions", "b"), &outcome, ttl).await.unwrap();
    cache.set(&key("embargo", "a"), &outcome, ttl).await.unwrap();

    let removed = cache.invalidate_provider("sanctions").await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&key("embargo", "a")).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn purge_sweeps_expired_entries() {
    let cache = MemoryResultCache::new();
    let outcome = Outcome::pass("clear");
    cache.set(&key("sanctions", "a"), &outcome, Duration::from_secs(10)).await.unwrap();
    cache.set(&key("sanctions", "b"), &outcome, Duration::from_secs(100)).await.unwrap();

    tokio::time::advance(Duration::from_secs(50)).await;
    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn second_run_is_served_entirely_from_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    registry.register(CountingProvider::new("sanctions", 3_600, Arc::clone(&calls)));
    let engine = Orchestrator::new(registry, Arc::new(MemoryResultCache::new()));

    let first = engine.execute_check(&pj_input(), &CheckOptions::default()).await.unwrap();
    assert!((first.metadata.cache_hit_rate).abs() < f64::EPSILON);

    let second = engine.execute_check(&pj_input(), &CheckOptions::default()).await.unwrap();
    assert!((second.metadata.cache_hit_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Verdict and score are identical across the cached run.
    assert_eq!(first.verdict, second.verdict);
    assert!((first.score - second.score).abs() < f64::EPSILON);
    assert!(second.sources[0].outcome.cached);
}

#[tokio::test(start_paused = true)]
async fn cache_bypass_re_evaluates_but_refreshes_the_entry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    registry.register(CountingProvider::new("sanctions", 3_600, Arc::clone(&calls)));
    let engine = Orchestrator::new(registry, Arc::new(MemoryResultCache::new()));

    engine.execute_check(&pj_input(), &CheckOptions::default()).await.unwrap();
    let bypass = CheckOptions {
        use_cache: false,
        ..CheckOptions::default()
    };
    engine.execute_check(&pj_input(), &bypass).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // The refreshed entry serves the next cached read.
    let third = engine.execute_check(&pj_input(), &CheckOptions::default()).await.unwrap();
    assert!((third.metadata.cache_hit_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
