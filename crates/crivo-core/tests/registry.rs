// crates/crivo-core/tests/registry.rs
// ============================================================================
// Module: Registry Tests
// Description: Provider registration, replacement, and selection ordering.
// Purpose: Ensure selection order is stable across hot swaps and priorities.
// ============================================================================

//! Registry tests for ordering, replacement, and category lookup.

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

use async_trait::async_trait;
use crivo_core::CheckProvider;
use crivo_core::InputKind;
use crivo_core::NormalizedInput;
use crivo_core::Outcome;
use crivo_core::Priority;
use crivo_core::ProviderCategory;
use crivo_core::ProviderConfig;
use crivo_core::ProviderError;
use crivo_core::ProviderMetadata;
use crivo_core::ProviderRegistry;

/// Minimal provider carrying only metadata.
struct NamedProvider {
    metadata: ProviderMetadata,
    config: ProviderConfig,
}

impl NamedProvider {
    fn new(name: &str, category: ProviderCategory, priority: u8, kind: InputKind) -> Arc<Self> {
        Self::with_config(name, category, priority, kind, ProviderConfig::default())
    }

    fn with_config(
        name: &str,
        category: ProviderCategory,
        priority: u8,
        kind: InputKind,
        config: ProviderConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            metadata: ProviderMetadata {
                name: name.to_string(),
                category,
                priority: Priority::new(priority).unwrap(),
                supported_kinds: BTreeSet::from([kind]),
            },
            config,
        })
    }
}

#[async_trait]
impl CheckProvider for NamedProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, _input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        Ok(Outcome::pass("ok"))
    }
}

#[test]
fn applicable_providers_are_ordered_by_priority_descending() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::new("low", ProviderCategory::Legal, 3, InputKind::TaxIdPj));
    registry.register(NamedProvider::new("high", ProviderCategory::Legal, 9, InputKind::TaxIdPj));
    registry.register(NamedProvider::new("mid", ProviderCategory::Legal, 6, InputKind::TaxIdPj));

    let names: Vec<String> = registry
        .applicable_for(InputKind::TaxIdPj)
        .iter()
        .map(|provider| provider.metadata().name.clone())
        .collect();
    assert_eq!(names, vec!["high", "mid", "low"]);
}

#[test]
fn registration_order_breaks_priority_ties() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::new("first", ProviderCategory::Legal, 5, InputKind::TaxIdPj));
    registry.register(NamedProvider::new("second", ProviderCategory::Legal, 5, InputKind::TaxIdPj));

    let names: Vec<String> = registry
        .applicable_for(InputKind::TaxIdPj)
        .iter()
        .map(|provider| provider.metadata().name.clone())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn re_registration_replaces_in_place() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::new("swap", ProviderCategory::Legal, 5, InputKind::TaxIdPj));
    registry.register(NamedProvider::new("other", ProviderCategory::Legal, 5, InputKind::TaxIdPj));
    registry.register(NamedProvider::new("swap", ProviderCategory::Social, 5, InputKind::TaxIdPj));

    assert_eq!(registry.len(), 2);
    let swapped = registry.get("swap").unwrap();
    assert_eq!(swapped.metadata().category, ProviderCategory::Social);

    // Position is preserved, so the tie-break order is unchanged.
    let names: Vec<String> = registry
        .applicable_for(InputKind::TaxIdPj)
        .iter()
        .map(|provider| provider.metadata().name.clone())
        .collect();
    assert_eq!(names, vec!["swap", "other"]);
}

#[test]
fn selection_filters_by_supported_kind() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::new("pj", ProviderCategory::Legal, 5, InputKind::TaxIdPj));
    registry.register(NamedProvider::new(
        "coords",
        ProviderCategory::Environmental,
        5,
        InputKind::Coordinates,
    ));

    let applicable = registry.applicable_for(InputKind::Coordinates);
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].metadata().name, "coords");
}

#[test]
fn disabled_providers_are_not_selectable() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::with_config(
        "dormant",
        ProviderCategory::Legal,
        5,
        InputKind::TaxIdPj,
        ProviderConfig {
            enabled: false,
            ..ProviderConfig::default()
        },
    ));
    registry.register(NamedProvider::new("live", ProviderCategory::Legal, 5, InputKind::TaxIdPj));

    let applicable = registry.applicable_for(InputKind::TaxIdPj);
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].metadata().name, "live");
}

#[test]
fn category_lookup_returns_matching_providers() {
    let mut registry = ProviderRegistry::new();
    registry.register(NamedProvider::new("pj", ProviderCategory::Legal, 5, InputKind::TaxIdPj));
    registry.register(NamedProvider::new(
        "coords",
        ProviderCategory::Environmental,
        5,
        InputKind::Coordinates,
    ));

    let legal = registry.by_category(ProviderCategory::Legal);
    assert_eq!(legal.len(), 1);
    assert_eq!(legal[0].metadata().name, "pj");
    assert!(registry.by_category(ProviderCategory::Positive).is_empty());
}
