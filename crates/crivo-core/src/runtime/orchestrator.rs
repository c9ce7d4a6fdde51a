// crates/crivo-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Crivo Orchestrator
// Description: Concurrent fan-out over applicable providers and consolidation.
// Purpose: Execute one check request end to end and build the response.
// Dependencies: crate::core, crate::interfaces, crate::runtime, tokio, uuid
// ============================================================================

//! ## Overview
//! The orchestrator normalizes the subject, selects applicable providers,
//! fans evaluation out concurrently under a semaphore cap and a request-level
//! deadline, then consolidates the completed result set into a verdict,
//! score, summary, and metadata.
//! Invariants:
//! - Every selected provider yields exactly one result slot; slots left open
//!   by the request deadline are back-filled with `Error` outcomes.
//! - Results are presented in selection order regardless of completion order.
//! - Aggregation runs only over the completed slot set, never incrementally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::core::CheckInput;
use crate::core::CheckOptions;
use crate::core::CheckResponse;
use crate::core::CheckSummary;
use crate::core::InputError;
use crate::core::InputKind;
use crate::core::NormalizedInput;
use crate::core::Outcome;
use crate::core::ResponseMetadata;
use crate::core::ScorePolicy;
use crate::core::SourceResult;
use crate::core::Timestamp;
use crate::core::aggregate;
use crate::core::API_VERSION;
use crate::interfaces::CheckProvider;
use crate::interfaces::ResultCache;
use crate::runtime::executor::run_provider;
use crate::runtime::registry::ProviderRegistry;

// ============================================================================
// SECTION: Errors and Limits
// ============================================================================

/// Orchestrator-level errors.
///
/// Only request-rejection conditions surface here; provider failures are
/// contained as `Error` outcomes.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The subject failed validation or normalization.
    #[error("invalid input: {0}")]
    Invalid(#[from] InputError),
    /// The registry holds no providers at all.
    #[error("no providers registered")]
    NoProvidersRegistered,
}

/// Request-level execution limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorLimits {
    /// Default deadline for the whole provider batch, in milliseconds.
    pub request_timeout_ms: u64,
    /// Maximum providers evaluating concurrently.
    pub max_concurrency: usize,
}

impl Default for OrchestratorLimits {
    fn default() -> Self {
        Self {
            request_timeout_ms: 30_000,
            max_concurrency: 16,
        }
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Check orchestration engine.
///
/// # Invariants
/// - The registry and score policy are fixed at construction; per-request
///   state never leaks between requests.
pub struct Orchestrator {
    /// Provider set for this engine instance.
    registry: ProviderRegistry,
    /// Shared result cache backend.
    cache: Arc<dyn ResultCache>,
    /// Severity weight table for aggregation.
    policy: ScorePolicy,
    /// Request-level execution limits.
    limits: OrchestratorLimits,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator over a registry and cache backend.
    #[must_use]
    pub fn new(registry: ProviderRegistry, cache: Arc<dyn ResultCache>) -> Self {
        Self {
            registry,
            cache,
            policy: ScorePolicy::default(),
            limits: OrchestratorLimits::default(),
        }
    }

    /// Overrides the score policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the execution limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: OrchestratorLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the provider registry.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Executes one check request end to end.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError`] when the subject is invalid or no
    /// provider is registered. Provider failures never surface as errors.
    pub async fn execute_check(
        &self,
        input: &CheckInput,
        options: &CheckOptions,
    ) -> Result<CheckResponse, OrchestratorError> {
        let started = Instant::now();
        let normalized = Arc::new(NormalizedInput::normalize(input.clone())?);

        if self.registry.is_empty() {
            return Err(OrchestratorError::NoProvidersRegistered);
        }

        let selected = self.select_providers(normalized.kind, options);
        tracing::info!(
            kind = %normalized.kind,
            selected = selected.len(),
            "executing check"
        );

        let results = self.fan_out(&selected, &normalized, options).await;

        let aggregation = aggregate(&results, &self.policy);
        let summary = CheckSummary::tally(&results);
        let cached = results.iter().filter(|result| result.outcome.cached).count();
        #[allow(
            clippy::cast_precision_loss,
            reason = "Source counts are far below f64 precision limits."
        )]
        let cache_hit_rate = if results.is_empty() {
            0.0
        } else {
            cached as f64 / results.len() as f64
        };

        let mut sources = results;
        if !options.include_evidence {
            for source in &mut sources {
                source.outcome.evidence = None;
            }
        }

        Ok(CheckResponse {
            check_id: Uuid::new_v4().to_string(),
            input: (*normalized).clone(),
            timestamp: Timestamp::now_utc(),
            verdict: aggregation.verdict,
            score: aggregation.score,
            sources,
            summary,
            metadata: ResponseMetadata {
                processing_time_ms: u64::try_from(started.elapsed().as_millis())
                    .unwrap_or(u64::MAX),
                cache_hit_rate,
                api_version: API_VERSION.to_owned(),
                timestamp: Timestamp::now_utc(),
            },
        })
    }

    /// Selects providers for the subject kind, honoring the allow-list.
    fn select_providers(
        &self,
        kind: InputKind,
        options: &CheckOptions,
    ) -> Vec<Arc<dyn CheckProvider>> {
        let applicable = self.registry.applicable_for(kind);
        if options.selects_all() {
            return applicable;
        }
        applicable
            .into_iter()
            .filter(|provider| {
                options
                    .sources
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(&provider.metadata().name))
            })
            .collect()
    }

    /// Fans evaluation out over the selected providers and fills every slot.
    async fn fan_out(
        &self,
        selected: &[Arc<dyn CheckProvider>],
        normalized: &Arc<NormalizedInput>,
        options: &CheckOptions,
    ) -> Vec<SourceResult> {
        let request_timeout = Duration::from_millis(
            options.timeout_ms.unwrap_or(self.limits.request_timeout_ms),
        );
        let deadline = tokio::time::Instant::now() + request_timeout;
        let semaphore = Arc::new(Semaphore::new(self.limits.max_concurrency.max(1)));

        let mut join_set = JoinSet::new();
        for (index, provider) in selected.iter().enumerate() {
            let provider = Arc::clone(provider);
            let cache = Arc::clone(&self.cache);
            let input = Arc::clone(normalized);
            let semaphore = Arc::clone(&semaphore);
            let use_cache = options.use_cache;
            join_set.spawn(async move {
                // Holds the permit for the duration of the evaluation.
                let _permit = semaphore.acquire_owned().await.ok();
                (index, run_provider(provider, cache, input, use_cache).await)
            });
        }

        let mut slots: Vec<Option<SourceResult>> = vec![None; selected.len()];
        let mut deadline_hit = false;
        loop {
            let joined = tokio::time::timeout_at(deadline, join_set.join_next()).await;
            match joined {
                Ok(Some(Ok((index, result)))) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(result);
                    }
                }
                Ok(Some(Err(error))) => {
                    tracing::warn!(%error, "provider task failed to join");
                }
                Ok(None) => break,
                Err(_) => {
                    deadline_hit = true;
                    join_set.abort_all();
                    break;
                }
            }
        }

        let message = if deadline_hit {
            "request timeout"
        } else {
            "provider task failed"
        };
        selected
            .iter()
            .zip(slots)
            .map(|(provider, slot)| {
                slot.unwrap_or_else(|| {
                    let metadata = provider.metadata();
                    SourceResult {
                        provider_name: metadata.name.clone(),
                        category: metadata.category,
                        priority: metadata.priority,
                        outcome: Outcome::error(message),
                    }
                })
            })
            .collect()
    }
}
