// crates/crivo-providers/tests/providers.rs
// ============================================================================
// Module: Built-In Provider Tests
// Description: Dataset-snapshot evaluation behavior per provider.
// Purpose: Ensure each built-in provider maps dataset hits to the right outcome.
// ============================================================================

//! Provider tests over small inline dataset snapshots.

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

use crivo_core::CheckInput;
use crivo_core::CheckProvider;
use crivo_core::CheckStatus;
use crivo_core::InputKind;
use crivo_core::NormalizedInput;
use crivo_core::ProviderConfig;
use crivo_core::RawValue;
use crivo_core::Severity;
use crivo_providers::DeforestationProvider;
use crivo_providers::DeforestationSettings;
use crivo_providers::EmbargoProvider;
use crivo_providers::LaborProvider;
use crivo_providers::OrganicProvider;
use crivo_providers::SanctionsProvider;

/// Sanctions snapshot with one listed subject.
const SANCTIONS: &str = r#"{
    "info": { "source_name": "Consolidated Sanctions List", "url": "https://example.org/sanctions", "last_update": 1700000000000 },
    "entries": {
        "12345678000195": [
            { "program": "GLOBAL", "reason": "asset freeze" }
        ]
    }
}"#;

/// Embargo snapshot with one active and one lifted record.
const EMBARGO: &str = r#"{
    "info": { "source_name": "Environmental Embargoes", "url": null, "last_update": 1700000000000 },
    "entries": {
        "BR123ABC": [
            { "case_id": "E-1", "area": "plot 7", "issued_at": 1600000000000, "active": true }
        ],
        "BR999ZZZ": [
            { "case_id": "E-2", "area": "plot 9", "issued_at": 1500000000000, "active": false }
        ]
    }
}"#;

/// Forced-labor snapshot with one listed employer.
const LABOR: &str = r#"{
    "info": { "source_name": "Forced Labor Registry", "url": null, "last_update": 1700000000000 },
    "entries": {
        "12345678000195": { "case_id": "L-1", "included_at": 1650000000000, "workers": 12 }
    }
}"#;

/// Deforestation snapshot with one alert point and one registration entry.
const DEFORESTATION: &str = r#"{
    "info": { "source_name": "Deforestation Alerts", "url": null, "last_update": 1700000000000 },
    "alerts": [
        { "location": { "lat": -3.1, "lon": -60.0 }, "detected_at": 1690000000000, "area_ha": 4.2 }
    ],
    "by_registration": {
        "BR123ABC": [
            { "location": { "lat": -3.1, "lon": -60.0 }, "detected_at": 1690000000000, "area_ha": 4.2 }
        ]
    }
}"#;

/// Organic snapshot with one valid and one expired certificate.
const ORGANIC: &str = r#"{
    "info": { "source_name": "Organic Certifications", "url": null, "last_update": 1700000000000 },
    "entries": {
        "12345678000195": { "certificate_id": "C-1", "certifier": "CertOrg", "valid_until": 4102444800000 },
        "98765432000109": { "certificate_id": "C-2", "certifier": "CertOrg", "valid_until": 946684800000 }
    }
}"#;

/// Normalizes a text subject.
fn subject(kind: InputKind, value: &str) -> NormalizedInput {
    NormalizedInput::normalize(CheckInput {
        kind,
        value: RawValue::Text(value.to_string()),
    })
    .unwrap()
}

#[tokio::test]
async fn sanctions_listing_fails_critically() {
    let provider =
        SanctionsProvider::from_json_str(SANCTIONS, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "12.345.678/0001-95")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert_eq!(outcome.severity, Some(Severity::Critical));
    assert!(outcome.details.is_some());
}

#[tokio::test]
async fn unlisted_subject_passes_sanctions() {
    let provider =
        SanctionsProvider::from_json_str(SANCTIONS, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "98.765.432/0001-09")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Pass);
    assert_eq!(outcome.severity, None);
    assert_eq!(
        outcome.evidence.unwrap().source_name,
        "Consolidated Sanctions List"
    );
}

#[tokio::test]
async fn active_embargo_fails_high() {
    let provider = EmbargoProvider::from_json_str(EMBARGO, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::RuralRegistration, "br-123.abc")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert_eq!(outcome.severity, Some(Severity::High));
}

#[tokio::test]
async fn lifted_embargo_passes() {
    let provider = EmbargoProvider::from_json_str(EMBARGO, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::RuralRegistration, "BR999ZZZ")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Pass);
}

#[tokio::test]
async fn forced_labor_hit_fails_critically() {
    let provider = LaborProvider::from_json_str(LABOR, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "12345678000195")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert_eq!(outcome.severity, Some(Severity::Critical));
}

#[tokio::test]
async fn nearby_alert_warns_at_medium() {
    let provider = DeforestationProvider::from_json_str(
        DEFORESTATION,
        ProviderConfig::default(),
        DeforestationSettings::default(),
    )
    .unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::Coordinates, "-3.1, -60.0")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert_eq!(outcome.severity, Some(Severity::Medium));
}

#[tokio::test]
async fn distant_coordinates_pass_deforestation() {
    let provider = DeforestationProvider::from_json_str(
        DEFORESTATION,
        ProviderConfig::default(),
        DeforestationSettings::default(),
    )
    .unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::Coordinates, "10.0, 10.0")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Pass);
}

#[tokio::test]
async fn registration_keyed_alerts_warn_too() {
    let provider = DeforestationProvider::from_json_str(
        DEFORESTATION,
        ProviderConfig::default(),
        DeforestationSettings::default(),
    )
    .unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::RuralRegistration, "BR123ABC")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Warning);
}

#[tokio::test]
async fn valid_certificate_passes_organic() {
    let provider = OrganicProvider::from_json_str(ORGANIC, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "12345678000195")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Pass);
}

#[tokio::test]
async fn expired_certificate_warns_low() {
    let provider = OrganicProvider::from_json_str(ORGANIC, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "98765432000109")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert_eq!(outcome.severity, Some(Severity::Low));
}

#[tokio::test]
async fn missing_certificate_is_not_applicable() {
    let provider = OrganicProvider::from_json_str(ORGANIC, ProviderConfig::default()).unwrap();
    let outcome =
        provider.evaluate(&subject(InputKind::TaxIdPj, "11111111000111")).await.unwrap();
    assert_eq!(outcome.status, CheckStatus::NotApplicable);
}

#[test]
fn malformed_snapshot_is_rejected_at_load() {
    let result = SanctionsProvider::from_json_str("{ not json", ProviderConfig::default());
    assert!(result.is_err());
}
