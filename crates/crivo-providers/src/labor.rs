// crates/crivo-providers/src/labor.rs
// ============================================================================
// Module: Labor Provider
// Description: Checks subjects against a forced-labor registry snapshot.
// Purpose: Flag forced-labor registry hits as blocking compliance failures.
// Dependencies: crivo-core, async-trait, serde, serde_json
// ============================================================================

//! ## Overview
//! The labor provider matches tax identities against a forced-labor registry
//! snapshot. Any hit is a `Fail` with `Critical` severity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crivo_core::CheckProvider;
use crivo_core::InputKind;
use crivo_core::NormalizedInput;
use crivo_core::Outcome;
use crivo_core::Priority;
use crivo_core::ProviderCategory;
use crivo_core::ProviderConfig;
use crivo_core::ProviderError;
use crivo_core::ProviderMetadata;
use crivo_core::Severity;
use crivo_core::Timestamp;

use crate::dataset::DatasetError;
use crate::dataset::DatasetInfo;

// ============================================================================
// SECTION: Snapshot Schema
// ============================================================================

/// One forced-labor registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborRecord {
    /// Inspection or case identifier.
    pub case_id: String,
    /// Inclusion time in the registry.
    pub included_at: Timestamp,
    /// Number of affected workers, when published.
    pub workers: Option<u32>,
}

/// Forced-labor snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Dataset provenance.
    info: DatasetInfo,
    /// Registry entries keyed by canonical tax identity.
    entries: BTreeMap<String, LaborRecord>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Forced-labor registry provider.
///
/// # Invariants
/// - Any registry hit yields `Fail` with `Critical` severity.
pub struct LaborProvider {
    /// Static provider metadata.
    metadata: ProviderMetadata,
    /// Static provider configuration.
    config: ProviderConfig,
    /// Dataset provenance.
    info: DatasetInfo,
    /// Registry entries keyed by canonical tax identity.
    entries: BTreeMap<String, LaborRecord>,
}

impl LaborProvider {
    /// Provider name as registered and used in cache keys.
    pub const NAME: &'static str = "labor";

    /// Loads the provider from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] when the snapshot is malformed.
    pub fn from_json_str(snapshot: &str, config: ProviderConfig) -> Result<Self, DatasetError> {
        let snapshot: Snapshot = serde_json::from_str(snapshot)?;
        Ok(Self {
            metadata: ProviderMetadata {
                name: Self::NAME.to_owned(),
                category: ProviderCategory::Social,
                priority: Priority::new(8).unwrap_or(Priority::MAX),
                supported_kinds: BTreeSet::from([InputKind::TaxIdPj, InputKind::TaxIdPf]),
            },
            config,
            info: snapshot.info,
            entries: snapshot.entries,
        })
    }
}

#[async_trait]
impl CheckProvider for LaborProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        let Some(record) = self.entries.get(&input.canonical_value) else {
            return Ok(Outcome::pass("subject not present in forced-labor registry")
                .with_evidence(self.info.evidence()));
        };
        Ok(Outcome::fail(
            Severity::Critical,
            "subject present in forced-labor registry",
        )
        .with_details(json!({ "record": record }))
        .with_evidence(self.info.evidence()))
    }
}
