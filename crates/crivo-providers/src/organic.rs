// crates/crivo-providers/src/organic.rs
// ============================================================================
// Module: Organic Certification Provider
// Description: Checks subjects against an organic-certification snapshot.
// Purpose: Surface valid certifications as positive signals, never penalties.
// Dependencies: crivo-core, async-trait, serde, serde_json
// ============================================================================

//! ## Overview
//! The organic provider is a positive-signal source: a valid certificate
//! passes, an expired one warns, and absence is `NotApplicable` because not
//! holding a certification is not a compliance failure.

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

/// One organic certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicCertificate {
    /// Certificate identifier.
    pub certificate_id: String,
    /// Certifying body.
    pub certifier: String,
    /// Expiry time.
    pub valid_until: Timestamp,
}

/// Organic-certification snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Dataset provenance.
    info: DatasetInfo,
    /// Certificates keyed by canonical subject value.
    entries: BTreeMap<String, OrganicCertificate>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Organic-certification provider.
///
/// # Invariants
/// - Absence from the registry is `NotApplicable`, never `Fail`.
pub struct OrganicProvider {
    /// Static provider metadata.
    metadata: ProviderMetadata,
    /// Static provider configuration.
    config: ProviderConfig,
    /// Dataset provenance.
    info: DatasetInfo,
    /// Certificates keyed by canonical subject value.
    entries: BTreeMap<String, OrganicCertificate>,
}

impl OrganicProvider {
    /// Provider name as registered and used in cache keys.
    pub const NAME: &'static str = "organic";

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
                category: ProviderCategory::Positive,
                priority: Priority::new(5).unwrap_or(Priority::MIN),
                supported_kinds: BTreeSet::from([
                    InputKind::TaxIdPj,
                    InputKind::TaxIdPf,
                    InputKind::Name,
                ]),
            },
            config,
            info: snapshot.info,
            entries: snapshot.entries,
        })
    }
}

#[async_trait]
impl CheckProvider for OrganicProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        let Some(certificate) = self.entries.get(&input.canonical_value) else {
            return Ok(Outcome::not_applicable("no organic certification on record")
                .with_evidence(self.info.evidence()));
        };
        if certificate.valid_until < Timestamp::now_utc() {
            return Ok(Outcome::warning(
                Severity::Low,
                "organic certification has expired",
            )
            .with_details(json!({ "certificate": certificate }))
            .with_evidence(self.info.evidence()));
        }
        Ok(Outcome::pass("organic certification is valid")
            .with_details(json!({ "certificate": certificate }))
            .with_evidence(self.info.evidence()))
    }
}
