// crates/crivo-core/src/runtime/mod.rs
// ============================================================================
// Module: Crivo Runtime
// Description: Provider registry, execution wrapper, and request orchestration.
// Purpose: Execute check requests over the registered provider set.
// Dependencies: crate::core, crate::interfaces, tokio, tracing, uuid
// ============================================================================

//! ## Overview
//! The runtime turns a check request into a consolidated response: the
//! registry selects applicable providers, the execution wrapper bounds and
//! contains each evaluation, and the orchestrator fans out, back-fills, and
//! aggregates.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod executor;
pub mod orchestrator;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use executor::run_provider;
pub use orchestrator::Orchestrator;
pub use orchestrator::OrchestratorError;
pub use orchestrator::OrchestratorLimits;
pub use registry::ProviderRegistry;
