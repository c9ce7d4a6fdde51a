// crates/crivo-providers/src/lib.rs
// ============================================================================
// Module: Crivo Built-In Providers
// Description: Dataset-snapshot providers for the built-in compliance sources.
// Purpose: Evaluate subjects against sanctions, embargo, labor, deforestation,
//          and organic-certification snapshots.
// Dependencies: crivo-core, async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Built-in providers evaluate against in-process dataset snapshots loaded
//! from JSON. Each provider carries its own metadata, configuration, and
//! evidence describing the underlying public dataset. Snapshot refresh is an
//! operational concern; providers only read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod dataset;
pub mod deforestation;
pub mod embargo;
pub mod labor;
pub mod organic;
pub mod registry;
pub mod sanctions;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dataset::DatasetError;
pub use dataset::DatasetInfo;
pub use deforestation::DeforestationProvider;
pub use embargo::EmbargoProvider;
pub use labor::LaborProvider;
pub use organic::OrganicProvider;
pub use deforestation::DeforestationSettings;
pub use registry::BuiltinProviderConfigs;
pub use registry::BuiltinSnapshots;
pub use registry::builtin_registry;
pub use sanctions::SanctionsProvider;
