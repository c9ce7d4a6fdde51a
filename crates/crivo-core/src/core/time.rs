// crates/crivo-core/src/core/time.rs
// ============================================================================
// Module: Crivo Time Model
// Description: Canonical timestamp representation for responses and evidence.
// Purpose: Provide a stable unix-millisecond wire form across Crivo records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Crivo stamps responses and evidence records with unix-millisecond
//! timestamps. The data model itself performs no clock reads beyond the
//! explicit [`Timestamp::now_utc`] constructor used by the runtime at
//! request completion; stored values are opaque and never validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Unix-millisecond timestamp used in Crivo responses and evidence.
///
/// # Invariants
/// - The wire form is a plain integer (milliseconds since the unix epoch).
/// - No validation or monotonicity is enforced by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix milliseconds.
    #[must_use]
    pub const fn unix_millis(self) -> i64 {
        self.0
    }

    /// Captures the current wall-clock time.
    ///
    /// Saturates at the i64 boundary rather than panicking on clock skew.
    #[must_use]
    pub fn now_utc() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let millis = i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX);
        Self(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
