// crates/crivo-core/src/runtime/registry.rs
// ============================================================================
// Module: Crivo Provider Registry
// Description: In-memory registry of check providers with stable ordering.
// Purpose: Hold the provider set and select applicable providers per request.
// Dependencies: crate::core, crate::interfaces, tracing
// ============================================================================

//! ## Overview
//! The registry owns the provider set for an engine instance. Registration
//! order is preserved; re-registering a name replaces the provider in place
//! so selection order stays stable across hot swaps.
//! Invariants:
//! - Provider names are unique; the last registration for a name wins.
//! - `applicable_for` returns only enabled providers, ordered by priority
//!   descending with registration order breaking ties.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::InputKind;
use crate::core::ProviderCategory;
use crate::interfaces::CheckProvider;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of check providers for one engine instance.
///
/// # Invariants
/// - Names are unique; re-registration replaces in place.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Providers in registration order.
    providers: Vec<Arc<dyn CheckProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any existing provider with the same
    /// name while keeping its position in the selection order.
    pub fn register(&mut self, provider: Arc<dyn CheckProvider>) {
        let name = provider.metadata().name.clone();
        if let Some(existing) = self
            .providers
            .iter_mut()
            .find(|candidate| candidate.metadata().name == name)
        {
            tracing::warn!(provider = %name, "replacing registered provider");
            *existing = provider;
        } else {
            self.providers.push(provider);
        }
    }

    /// Returns a provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CheckProvider>> {
        self.providers
            .iter()
            .find(|provider| provider.metadata().name == name)
    }

    /// Returns every registered provider in registration order.
    #[must_use]
    pub fn all(&self) -> &[Arc<dyn CheckProvider>] {
        &self.providers
    }

    /// Returns every provider in a category, in registration order.
    #[must_use]
    pub fn by_category(&self, category: ProviderCategory) -> Vec<Arc<dyn CheckProvider>> {
        self.providers
            .iter()
            .filter(|provider| provider.metadata().category == category)
            .cloned()
            .collect()
    }

    /// Returns enabled providers supporting the given subject kind, ordered
    /// by priority descending with registration order breaking ties.
    #[must_use]
    pub fn applicable_for(&self, kind: InputKind) -> Vec<Arc<dyn CheckProvider>> {
        let mut applicable: Vec<Arc<dyn CheckProvider>> = self
            .providers
            .iter()
            .filter(|provider| provider.config().enabled && provider.metadata().supports(kind))
            .cloned()
            .collect();
        // Stable sort keeps registration order within equal priorities.
        applicable.sort_by(|a, b| b.metadata().priority.cmp(&a.metadata().priority));
        applicable
    }

    /// Returns the registered provider count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true when no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self
            .providers
            .iter()
            .map(|provider| provider.metadata().name.as_str())
            .collect();
        f.debug_struct("ProviderRegistry")
            .field("providers", &names)
            .finish()
    }
}
