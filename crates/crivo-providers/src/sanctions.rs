// crates/crivo-providers/src/sanctions.rs
// ============================================================================
// Module: Sanctions Provider
// Description: Checks subjects against a sanctions-list snapshot.
// Purpose: Flag sanctioned tax identities as blocking compliance failures.
// Dependencies: crivo-core, async-trait, serde, serde_json
// ============================================================================

//! ## Overview
//! The sanctions provider matches the canonical tax identity against a
//! sanctions-list snapshot. A listed subject is a `Fail` with `Critical`
//! severity; an unlisted one passes.

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

use crate::dataset::DatasetError;
use crate::dataset::DatasetInfo;

// ============================================================================
// SECTION: Snapshot Schema
// ============================================================================

/// One sanctions-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionRecord {
    /// Sanction program name.
    pub program: String,
    /// Listing reason.
    pub reason: String,
}

/// Sanctions snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Dataset provenance.
    info: DatasetInfo,
    /// Listed subjects keyed by canonical tax identity (digits only).
    entries: BTreeMap<String, Vec<SanctionRecord>>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Sanctions-list provider.
///
/// # Invariants
/// - A listed subject always yields `Fail` with `Critical` severity.
pub struct SanctionsProvider {
    /// Static provider metadata.
    metadata: ProviderMetadata,
    /// Static provider configuration.
    config: ProviderConfig,
    /// Dataset provenance.
    info: DatasetInfo,
    /// Listed subjects keyed by canonical tax identity.
    entries: BTreeMap<String, Vec<SanctionRecord>>,
}

impl SanctionsProvider {
    /// Provider name as registered and used in cache keys.
    pub const NAME: &'static str = "sanctions";

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
                category: ProviderCategory::Legal,
                priority: Priority::MAX,
                supported_kinds: BTreeSet::from([InputKind::TaxIdPj, InputKind::TaxIdPf]),
            },
            config,
            info: snapshot.info,
            entries: snapshot.entries,
        })
    }
}

#[async_trait]
impl CheckProvider for SanctionsProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        let Some(records) = self.entries.get(&input.canonical_value) else {
            return Ok(Outcome::pass("no sanctions listing found")
                .with_evidence(self.info.evidence()));
        };
        let programs: Vec<&str> =
            records.iter().map(|record| record.program.as_str()).collect();
        Ok(Outcome::fail(
            Severity::Critical,
            format!("subject listed in {} sanction program(s)", records.len()),
        )
        .with_details(json!({ "programs": programs, "records": records }))
        .with_evidence(self.info.evidence()))
    }
}
