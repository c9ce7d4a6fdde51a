// crates/crivo-providers/src/registry.rs
// ============================================================================
// Module: Built-In Provider Registration
// Description: Bundled construction of the built-in provider set.
// Purpose: Build a ready-to-use registry from dataset snapshots and configs.
// Dependencies: crivo-core, crate providers
// ============================================================================

//! ## Overview
//! Registration helpers bundle the five built-in providers into one
//! [`ProviderRegistry`]. Snapshot loading fails eagerly so a malformed
//! dataset is rejected at startup, never at request time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crivo_core::ProviderConfig;
use crivo_core::ProviderRegistry;

use crate::dataset::DatasetError;
use crate::deforestation::DeforestationProvider;
use crate::deforestation::DeforestationSettings;
use crate::embargo::EmbargoProvider;
use crate::labor::LaborProvider;
use crate::organic::OrganicProvider;
use crate::sanctions::SanctionsProvider;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Per-provider configuration for the built-in set.
#[derive(Debug, Clone, Default)]
pub struct BuiltinProviderConfigs {
    /// Sanctions provider configuration.
    pub sanctions: ProviderConfig,
    /// Embargo provider configuration.
    pub embargo: ProviderConfig,
    /// Labor provider configuration.
    pub labor: ProviderConfig,
    /// Deforestation provider configuration.
    pub deforestation: ProviderConfig,
    /// Deforestation coordinate-matching settings.
    pub deforestation_settings: DeforestationSettings,
    /// Organic provider configuration.
    pub organic: ProviderConfig,
}

/// JSON snapshots for the built-in providers.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSnapshots<'a> {
    /// Sanctions-list snapshot.
    pub sanctions: &'a str,
    /// Environmental-embargo snapshot.
    pub embargo: &'a str,
    /// Forced-labor registry snapshot.
    pub labor: &'a str,
    /// Deforestation-alert snapshot.
    pub deforestation: &'a str,
    /// Organic-certification snapshot.
    pub organic: &'a str,
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Builds a registry holding the five built-in providers.
///
/// # Errors
///
/// Returns [`DatasetError`] when any snapshot is malformed.
pub fn builtin_registry(
    snapshots: BuiltinSnapshots<'_>,
    configs: &BuiltinProviderConfigs,
) -> Result<ProviderRegistry, DatasetError> {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(SanctionsProvider::from_json_str(
        snapshots.sanctions,
        configs.sanctions,
    )?));
    registry.register(Arc::new(EmbargoProvider::from_json_str(
        snapshots.embargo,
        configs.embargo,
    )?));
    registry.register(Arc::new(LaborProvider::from_json_str(
        snapshots.labor,
        configs.labor,
    )?));
    registry.register(Arc::new(DeforestationProvider::from_json_str(
        snapshots.deforestation,
        configs.deforestation,
        configs.deforestation_settings,
    )?));
    registry.register(Arc::new(OrganicProvider::from_json_str(
        snapshots.organic,
        configs.organic,
    )?));
    Ok(registry)
}
