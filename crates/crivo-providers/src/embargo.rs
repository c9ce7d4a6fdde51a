// crates/crivo-providers/src/embargo.rs
// ============================================================================
// Module: Embargo Provider
// Description: Checks subjects against an environmental-embargo snapshot.
// Purpose: Flag active environmental embargoes as blocking failures.
// Dependencies: crivo-core, async-trait, serde, serde_json
// ============================================================================

//! ## Overview
//! The embargo provider matches tax identities and rural registrations
//! against an environmental-embargo snapshot. Any active embargo record is a
//! `Fail` with `High` severity; lifted records are ignored.

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

/// One embargo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbargoRecord {
    /// Embargo case identifier.
    pub case_id: String,
    /// Embargoed area description.
    pub area: String,
    /// Embargo start time.
    pub issued_at: Timestamp,
    /// Whether the embargo is still in force.
    pub active: bool,
}

/// Embargo snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Dataset provenance.
    info: DatasetInfo,
    /// Embargo records keyed by canonical subject value.
    entries: BTreeMap<String, Vec<EmbargoRecord>>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Environmental-embargo provider.
///
/// # Invariants
/// - Only records with `active == true` contribute to the outcome.
pub struct EmbargoProvider {
    /// Static provider metadata.
    metadata: ProviderMetadata,
    /// Static provider configuration.
    config: ProviderConfig,
    /// Dataset provenance.
    info: DatasetInfo,
    /// Embargo records keyed by canonical subject value.
    entries: BTreeMap<String, Vec<EmbargoRecord>>,
}

impl EmbargoProvider {
    /// Provider name as registered and used in cache keys.
    pub const NAME: &'static str = "embargo";

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
                category: ProviderCategory::Environmental,
                priority: Priority::new(9).unwrap_or(Priority::MAX),
                supported_kinds: BTreeSet::from([
                    InputKind::TaxIdPj,
                    InputKind::TaxIdPf,
                    InputKind::RuralRegistration,
                ]),
            },
            config,
            info: snapshot.info,
            entries: snapshot.entries,
        })
    }
}

#[async_trait]
impl CheckProvider for EmbargoProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        let active: Vec<&EmbargoRecord> = self
            .entries
            .get(&input.canonical_value)
            .into_iter()
            .flatten()
            .filter(|record| record.active)
            .collect();
        if active.is_empty() {
            return Ok(Outcome::pass("no active embargo found")
                .with_evidence(self.info.evidence()));
        }
        Ok(Outcome::fail(
            Severity::High,
            format!("{} active embargo record(s) found", active.len()),
        )
        .with_details(json!({ "records": active }))
        .with_evidence(self.info.evidence()))
    }
}
