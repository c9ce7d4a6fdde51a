// crates/crivo-core/src/runtime/executor.rs
// ============================================================================
// Module: Crivo Execution Wrapper
// Description: Per-provider evaluation with cache, timeout, and containment.
// Purpose: Turn one provider call into exactly one outcome, never a failure.
// Dependencies: crate::core, crate::interfaces, tokio, tracing
// ============================================================================

//! ## Overview
//! The execution wrapper runs a single provider against a normalized subject
//! and always produces an outcome. Caching, timeout enforcement, and failure
//! containment live here, not in the providers.
//! Invariants:
//! - Disabled and non-applicable providers short-circuit before any cache
//!   read or evaluation.
//! - Cache failures degrade to miss behavior; they never fail the check.
//! - `Error` outcomes are never written to the cache.
//! - Cache hits keep the original `execution_time_ms`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use crate::core::CheckStatus;
use crate::core::NormalizedInput;
use crate::core::Outcome;
use crate::core::SourceResult;
use crate::interfaces::CacheKey;
use crate::interfaces::CheckProvider;
use crate::interfaces::ProviderError;
use crate::interfaces::ResultCache;

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one provider against a normalized subject.
///
/// Always returns a [`SourceResult`]; provider failures, timeouts, and cache
/// backend failures are contained here and never propagate.
pub async fn run_provider(
    provider: Arc<dyn CheckProvider>,
    cache: Arc<dyn ResultCache>,
    input: Arc<NormalizedInput>,
    use_cache: bool,
) -> SourceResult {
    let metadata = provider.metadata();
    let name = metadata.name.clone();
    let category = metadata.category;
    let priority = metadata.priority;
    let config = *provider.config();

    let attribute = |outcome: Outcome| SourceResult {
        provider_name: name.clone(),
        category,
        priority,
        outcome,
    };

    if !config.enabled {
        return attribute(Outcome::not_applicable("provider disabled"));
    }
    if !metadata.supports(input.kind) {
        return attribute(Outcome::not_applicable(format!(
            "input kind {} not supported",
            input.kind
        )));
    }

    let key = CacheKey::for_check(&input, name.clone());

    if use_cache {
        match cache.get(&key).await {
            Ok(Some(outcome)) => {
                tracing::debug!(provider = %name, "cache hit");
                return attribute(outcome.as_cached());
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(provider = %name, %error, "cache read failed; treating as miss");
            }
        }
    }

    let started = Instant::now();
    let evaluated = tokio::time::timeout(config.timeout(), provider.evaluate(&input)).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let outcome = match evaluated {
        Ok(Ok(outcome)) => outcome.with_execution_time(elapsed_ms),
        Ok(Err(error)) => {
            tracing::warn!(provider = %name, %error, "provider evaluation failed");
            Outcome::error(error.to_string()).with_execution_time(elapsed_ms)
        }
        Err(_) => {
            tracing::warn!(
                provider = %name,
                timeout_ms = config.timeout_ms,
                "provider evaluation timed out"
            );
            let error = ProviderError::Timeout {
                timeout_ms: config.timeout_ms,
            };
            Outcome::error(error.to_string()).with_execution_time(elapsed_ms)
        }
    };

    if !matches!(outcome.status, CheckStatus::Error) {
        if let Err(error) = cache.set(&key, &outcome, config.cache_ttl()).await {
            tracing::warn!(provider = %name, %error, "cache write failed");
        }
    }

    attribute(outcome)
}
