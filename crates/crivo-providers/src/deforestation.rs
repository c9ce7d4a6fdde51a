// crates/crivo-providers/src/deforestation.rs
// ============================================================================
// Module: Deforestation Provider
// Description: Checks locations against a deforestation-alert snapshot.
// Purpose: Surface recent deforestation alerts near the subject as warnings.
// Dependencies: crivo-core, async-trait, serde, serde_json
// ============================================================================

//! ## Overview
//! The deforestation provider matches coordinates against alert points within
//! a configured radius, and rural registrations against alerts keyed to the
//! registration. Alerts are advisory: hits are `Warning` with `Medium`
//! severity, never failures.

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
use crivo_core::GeoPoint;
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
// SECTION: Configuration
// ============================================================================

/// Configuration for coordinate matching.
///
/// # Invariants
/// - `radius_km` bounds the great-circle distance for a coordinate hit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DeforestationSettings {
    /// Match radius around the subject coordinates, in kilometers.
    pub radius_km: f64,
}

impl Default for DeforestationSettings {
    fn default() -> Self {
        Self {
            radius_km: 10.0,
        }
    }
}

// ============================================================================
// SECTION: Snapshot Schema
// ============================================================================

/// One deforestation alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeforestationAlert {
    /// Alert location.
    pub location: GeoPoint,
    /// Detection time.
    pub detected_at: Timestamp,
    /// Affected area in hectares, when published.
    pub area_ha: Option<f64>,
}

/// Deforestation snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Dataset provenance.
    info: DatasetInfo,
    /// Alert points matched by coordinate proximity.
    alerts: Vec<DeforestationAlert>,
    /// Alerts keyed by canonical rural registration.
    #[serde(default)]
    by_registration: BTreeMap<String, Vec<DeforestationAlert>>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Deforestation-alert provider.
///
/// # Invariants
/// - Hits are `Warning`/`Medium`, never `Fail`.
pub struct DeforestationProvider {
    /// Static provider metadata.
    metadata: ProviderMetadata,
    /// Static provider configuration.
    config: ProviderConfig,
    /// Coordinate-matching settings.
    settings: DeforestationSettings,
    /// Dataset provenance.
    info: DatasetInfo,
    /// Alert points matched by coordinate proximity.
    alerts: Vec<DeforestationAlert>,
    /// Alerts keyed by canonical rural registration.
    by_registration: BTreeMap<String, Vec<DeforestationAlert>>,
}

impl DeforestationProvider {
    /// Provider name as registered and used in cache keys.
    pub const NAME: &'static str = "deforestation";

    /// Loads the provider from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] when the snapshot is malformed.
    pub fn from_json_str(
        snapshot: &str,
        config: ProviderConfig,
        settings: DeforestationSettings,
    ) -> Result<Self, DatasetError> {
        let snapshot: Snapshot = serde_json::from_str(snapshot)?;
        Ok(Self {
            metadata: ProviderMetadata {
                name: Self::NAME.to_owned(),
                category: ProviderCategory::Environmental,
                priority: Priority::new(7).unwrap_or(Priority::MAX),
                supported_kinds: BTreeSet::from([
                    InputKind::Coordinates,
                    InputKind::RuralRegistration,
                ]),
            },
            config,
            settings,
            info: snapshot.info,
            alerts: snapshot.alerts,
            by_registration: snapshot.by_registration,
        })
    }

    /// Returns alerts within the configured radius of the point.
    fn nearby_alerts(&self, point: GeoPoint) -> Vec<&DeforestationAlert> {
        self.alerts
            .iter()
            .filter(|alert| haversine_km(point, alert.location) <= self.settings.radius_km)
            .collect()
    }
}

#[async_trait]
impl CheckProvider for DeforestationProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn evaluate(&self, input: &NormalizedInput) -> Result<Outcome, ProviderError> {
        let matched: Vec<&DeforestationAlert> = match input.kind {
            InputKind::Coordinates => {
                let point = input.coordinates.ok_or_else(|| {
                    ProviderError::Runtime("coordinates missing from normalized input".to_owned())
                })?;
                self.nearby_alerts(point)
            }
            _ => self
                .by_registration
                .get(&input.canonical_value)
                .into_iter()
                .flatten()
                .collect(),
        };
        if matched.is_empty() {
            return Ok(Outcome::pass("no deforestation alerts found")
                .with_evidence(self.info.evidence()));
        }
        Ok(Outcome::warning(
            Severity::Medium,
            format!("{} deforestation alert(s) found", matched.len()),
        )
        .with_details(json!({ "alert_count": matched.len(), "alerts": matched }))
        .with_evidence(self.info.evidence()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Great-circle distance between two points, in kilometers.
fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6_371.0;
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
