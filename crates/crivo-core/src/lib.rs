// crates/crivo-core/src/lib.rs
// ============================================================================
// Module: Crivo Core Library
// Description: Public API surface for the Crivo check orchestration engine.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Crivo evaluates one subject against many compliance data sources
//! concurrently and consolidates the results into a deterministic verdict and
//! score. It is backend-agnostic and integrates through explicit interfaces
//! rather than embedding into transport frameworks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CacheError;
pub use interfaces::CacheKey;
pub use interfaces::CheckProvider;
pub use interfaces::NoopResultCache;
pub use interfaces::ProviderError;
pub use interfaces::ResultCache;
pub use runtime::Orchestrator;
pub use runtime::OrchestratorError;
pub use runtime::OrchestratorLimits;
pub use runtime::ProviderRegistry;
pub use runtime::run_provider;
