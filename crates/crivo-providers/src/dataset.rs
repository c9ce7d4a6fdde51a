// crates/crivo-providers/src/dataset.rs
// ============================================================================
// Module: Dataset Support
// Description: Shared dataset metadata and loading errors for built-in providers.
// Purpose: Describe snapshot provenance and surface malformed snapshots early.
// Dependencies: crivo-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Every built-in provider reads a JSON snapshot of a public dataset. The
//! snapshot carries provenance metadata that becomes outcome evidence, and
//! loading fails eagerly at construction so a malformed snapshot can never
//! reach request time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crivo_core::Evidence;
use crivo_core::Timestamp;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Dataset snapshot loading errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The snapshot is not valid JSON or does not match the schema.
    #[error("malformed dataset snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ============================================================================
// SECTION: Provenance
// ============================================================================

/// Provenance of a dataset snapshot.
///
/// # Invariants
/// - `source_name` is the human-readable dataset name surfaced as evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Human-readable dataset name.
    pub source_name: String,
    /// Optional public reference for the dataset.
    pub url: Option<String>,
    /// Last-update time of the snapshot, unix milliseconds.
    pub last_update: Option<Timestamp>,
}

impl DatasetInfo {
    /// Builds outcome evidence from the provenance.
    #[must_use]
    pub fn evidence(&self) -> Evidence {
        Evidence {
            source_name: self.source_name.clone(),
            url: self.url.clone(),
            last_update: self.last_update,
            raw: None,
        }
    }
}
