// crates/crivo-core/src/core/input.rs
// ============================================================================
// Module: Crivo Input Model
// Description: Subject kinds, raw inbound values, and deterministic normalization.
// Purpose: Produce canonical, deduplication-safe inputs before any provider runs.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every check request names one subject: a tax identifier, a rural-property
//! registration, a coordinate, an address, or a name. Normalization maps the
//! raw value to a canonical string with a pure, deterministic function of the
//! value and its kind. Two inputs with equal kind and canonical value are
//! identical for caching and deduplication.
//! Invariants:
//! - [`NormalizedInput`] is only constructed through [`NormalizedInput::normalize`].
//! - Malformed input is a request-level rejection; no provider runs for it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Input Kinds
// ============================================================================

/// Subject kinds accepted by the engine.
///
/// # Invariants
/// - Variants are stable for serialization and cache-key construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Corporate tax identifier (14 digits).
    TaxIdPj,
    /// Personal tax identifier (11 digits).
    TaxIdPf,
    /// Rural-property registration number.
    RuralRegistration,
    /// State-level registration number.
    StateRegistration,
    /// Geographic coordinate pair.
    Coordinates,
    /// Free-form postal address.
    Address,
    /// Person or organization name.
    Name,
}

impl InputKind {
    /// Returns the stable wire label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaxIdPj => "tax_id_pj",
            Self::TaxIdPf => "tax_id_pf",
            Self::RuralRegistration => "rural_registration",
            Self::StateRegistration => "state_registration",
            Self::Coordinates => "coordinates",
            Self::Address => "address",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Raw Values
// ============================================================================

/// Geographic coordinate pair in decimal degrees.
///
/// # Invariants
/// - Latitude is within [-90, 90] and longitude within [-180, 180] once the
///   value has passed normalization; raw deserialized values are unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Raw inbound value for a check subject.
///
/// # Invariants
/// - Text values are opaque until normalization; no trimming happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Textual subject value.
    Text(String),
    /// Coordinate subject value.
    Point(GeoPoint),
}

/// Validated inbound check request subject.
///
/// # Invariants
/// - Schema-checked by the request layer; semantic validation happens in
///   [`NormalizedInput::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInput {
    /// Subject kind.
    pub kind: InputKind,
    /// Raw subject value.
    pub value: RawValue,
}

// ============================================================================
// SECTION: Normalization Errors
// ============================================================================

/// Maximum canonical length for registration-style inputs.
const MAX_REGISTRATION_LEN: usize = 64;

/// Maximum canonical length for address and name inputs.
const MAX_TEXT_LEN: usize = 256;

/// Input normalization errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum InputError {
    /// Value is empty after normalization.
    #[error("empty value for input kind {0}")]
    Empty(InputKind),
    /// Value shape does not match the declared kind.
    #[error("value shape does not match input kind {0}")]
    WrongShape(InputKind),
    /// Tax identifier has the wrong digit count.
    #[error("tax id for {kind} must have {expected} digits, got {actual}")]
    InvalidTaxId {
        /// Declared input kind.
        kind: InputKind,
        /// Expected digit count.
        expected: usize,
        /// Actual digit count.
        actual: usize,
    },
    /// Tax identifier is all zeros.
    #[error("tax id is all zeros")]
    ZeroTaxId,
    /// Coordinate component is out of range.
    #[error("coordinate out of range: {field} = {value}")]
    CoordinateOutOfRange {
        /// Offending coordinate field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Coordinate text could not be parsed.
    #[error("malformed coordinate text: {0}")]
    MalformedCoordinates(String),
    /// Canonical value exceeds the length bound for the kind.
    #[error("value for {kind} exceeds {max} characters")]
    TooLong {
        /// Declared input kind.
        kind: InputKind,
        /// Maximum canonical length.
        max: usize,
    },
}

// ============================================================================
// SECTION: Normalized Input
// ============================================================================

/// Canonical, deduplication-safe representation of a check subject.
///
/// # Invariants
/// - `canonical_value` is a pure, deterministic function of `raw_value` and
///   `kind`; equal (kind, canonical value) pairs are identical for caching.
/// - Created once per request and immutable afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    /// Subject kind.
    pub kind: InputKind,
    /// Canonical subject value.
    pub canonical_value: String,
    /// Raw value as received.
    pub raw_value: RawValue,
    /// Parsed coordinates, present only for coordinate inputs.
    pub coordinates: Option<GeoPoint>,
}

impl NormalizedInput {
    /// Normalizes a validated inbound subject.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the value is malformed for its kind; the
    /// request must be rejected before any provider runs.
    pub fn normalize(input: CheckInput) -> Result<Self, InputError> {
        let (canonical, coordinates) = match (input.kind, &input.value) {
            (InputKind::TaxIdPj, RawValue::Text(text)) => (normalize_tax_id(input.kind, text, 14)?, None),
            (InputKind::TaxIdPf, RawValue::Text(text)) => (normalize_tax_id(input.kind, text, 11)?, None),
            (InputKind::RuralRegistration | InputKind::StateRegistration, RawValue::Text(text)) => {
                (normalize_registration(input.kind, text)?, None)
            }
            (InputKind::Address | InputKind::Name, RawValue::Text(text)) => {
                (normalize_text(input.kind, text)?, None)
            }
            (InputKind::Coordinates, RawValue::Point(point)) => {
                let point = validate_point(*point)?;
                (canonical_point(point), Some(point))
            }
            (InputKind::Coordinates, RawValue::Text(text)) => {
                let point = parse_point(text)?;
                (canonical_point(point), Some(point))
            }
            (_, RawValue::Point(_)) => return Err(InputError::WrongShape(input.kind)),
        };

        Ok(Self {
            kind: input.kind,
            canonical_value: canonical,
            raw_value: input.value,
            coordinates,
        })
    }
}

// ============================================================================
// SECTION: Normalization Helpers
// ============================================================================

/// Normalizes a tax identifier to its digits and checks the digit count.
fn normalize_tax_id(kind: InputKind, text: &str, expected: usize) -> Result<String, InputError> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(InputError::Empty(kind));
    }
    if digits.len() != expected {
        return Err(InputError::InvalidTaxId {
            kind,
            expected,
            actual: digits.len(),
        });
    }
    if digits.bytes().all(|byte| byte == b'0') {
        return Err(InputError::ZeroTaxId);
    }
    Ok(digits)
}

/// Normalizes a registration number to uppercase alphanumeric characters.
fn normalize_registration(kind: InputKind, text: &str) -> Result<String, InputError> {
    let canonical: String = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    if canonical.is_empty() {
        return Err(InputError::Empty(kind));
    }
    if canonical.len() > MAX_REGISTRATION_LEN {
        return Err(InputError::TooLong {
            kind,
            max: MAX_REGISTRATION_LEN,
        });
    }
    Ok(canonical)
}

/// Normalizes free text by collapsing whitespace and uppercasing.
fn normalize_text(kind: InputKind, text: &str) -> Result<String, InputError> {
    let canonical = text.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    if canonical.is_empty() {
        return Err(InputError::Empty(kind));
    }
    if canonical.len() > MAX_TEXT_LEN {
        return Err(InputError::TooLong {
            kind,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(canonical)
}

/// Validates coordinate ranges.
fn validate_point(point: GeoPoint) -> Result<GeoPoint, InputError> {
    if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
        return Err(InputError::CoordinateOutOfRange {
            field: "lat",
            value: point.lat,
        });
    }
    if !point.lon.is_finite() || !(-180.0..=180.0).contains(&point.lon) {
        return Err(InputError::CoordinateOutOfRange {
            field: "lon",
            value: point.lon,
        });
    }
    Ok(point)
}

/// Parses a `"lat,lon"` text pair into a validated point.
fn parse_point(text: &str) -> Result<GeoPoint, InputError> {
    let mut parts = text.split(',');
    let lat = parts.next().map(str::trim);
    let lon = parts.next().map(str::trim);
    if parts.next().is_some() {
        return Err(InputError::MalformedCoordinates(text.to_string()));
    }
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let lat: f64 =
                lat.parse().map_err(|_| InputError::MalformedCoordinates(text.to_string()))?;
            let lon: f64 =
                lon.parse().map_err(|_| InputError::MalformedCoordinates(text.to_string()))?;
            validate_point(GeoPoint {
                lat,
                lon,
            })
        }
        _ => Err(InputError::MalformedCoordinates(text.to_string())),
    }
}

/// Formats a validated point as the canonical cache-safe string.
fn canonical_point(point: GeoPoint) -> String {
    format!("{:.6},{:.6}", point.lat, point.lon)
}
