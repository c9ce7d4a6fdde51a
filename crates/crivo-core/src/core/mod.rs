// crates/crivo-core/src/core/mod.rs
// ============================================================================
// Module: Crivo Core Types
// Description: Canonical data model for inputs, outcomes, verdicts, and responses.
// Purpose: Provide stable, serializable types for the check orchestration engine.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Crivo core types define the subject model, provider metadata, per-source
//! outcomes, the aggregation fold, and the consolidated response. These types
//! are the canonical source of truth for any derived API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod input;
pub mod outcome;
pub mod provider;
pub mod response;
pub mod time;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use input::CheckInput;
pub use input::GeoPoint;
pub use input::InputError;
pub use input::InputKind;
pub use input::NormalizedInput;
pub use input::RawValue;
pub use outcome::CheckStatus;
pub use outcome::Evidence;
pub use outcome::Outcome;
pub use outcome::Severity;
pub use outcome::SourceResult;
pub use provider::Priority;
pub use provider::PriorityError;
pub use provider::ProviderCategory;
pub use provider::ProviderConfig;
pub use provider::ProviderMetadata;
pub use response::API_VERSION;
pub use response::CheckOptions;
pub use response::CheckResponse;
pub use response::CheckSummary;
pub use response::ResponseMetadata;
pub use time::Timestamp;
pub use verdict::Aggregation;
pub use verdict::ScorePolicy;
pub use verdict::Verdict;
pub use verdict::aggregate;
