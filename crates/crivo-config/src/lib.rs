// crates/crivo-config/src/lib.rs
// ============================================================================
// Module: Crivo Configuration
// Description: Configuration loading and validation for the Crivo engine.
// Purpose: Provide strict TOML config parsing mapped onto runtime types.
// Dependencies: crivo-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Engine configuration is loaded from TOML and validated before use:
//! request limits, score weights, and per-provider overrides. Invalid
//! configuration fails at load, never at request time. Defaults mirror the
//! in-code defaults so an absent file and an empty file behave identically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crivo_core::OrchestratorLimits;
use crivo_core::ProviderConfig;
use crivo_core::ScorePolicy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The config file is not valid TOML.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A config value is out of range or inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Request-level execution limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestLimits {
    /// Default deadline for the whole provider batch, in milliseconds.
    pub timeout_ms: u64,
    /// Maximum providers evaluating concurrently.
    pub max_concurrency: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        let limits = OrchestratorLimits::default();
        Self {
            timeout_ms: limits.request_timeout_ms,
            max_concurrency: limits.max_concurrency,
        }
    }
}

impl From<RequestLimits> for OrchestratorLimits {
    fn from(limits: RequestLimits) -> Self {
        Self {
            request_timeout_ms: limits.timeout_ms,
            max_concurrency: limits.max_concurrency,
        }
    }
}

/// Severity weight table as configured.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Penalty weight for low severity.
    pub low: f64,
    /// Penalty weight for medium severity.
    pub medium: f64,
    /// Penalty weight for high severity.
    pub high: f64,
    /// Penalty weight for critical severity.
    pub critical: f64,
    /// Multiplier applied to warning penalties.
    pub warning_factor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let policy = ScorePolicy::default();
        Self {
            low: policy.low,
            medium: policy.medium,
            high: policy.high,
            critical: policy.critical,
            warning_factor: policy.warning_factor,
        }
    }
}

impl From<ScoreWeights> for ScorePolicy {
    fn from(weights: ScoreWeights) -> Self {
        Self {
            low: weights.low,
            medium: weights.medium,
            high: weights.high,
            critical: weights.critical,
            warning_factor: weights.warning_factor,
        }
    }
}

/// Per-provider override settings.
///
/// Absent fields keep the provider's compiled-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Whether the provider participates in checks.
    pub enabled: Option<bool>,
    /// Cache TTL for non-error outcomes, in seconds.
    pub cache_ttl_seconds: Option<u64>,
    /// Evaluation timeout, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl ProviderSettings {
    /// Overlays these settings onto a provider configuration.
    #[must_use]
    pub fn apply_to(&self, mut config: ProviderConfig) -> ProviderConfig {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(cache_ttl_seconds) = self.cache_ttl_seconds {
            config.cache_ttl_seconds = cache_ttl_seconds;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}

/// Engine configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Request-level limits.
    pub request: RequestLimits,
    /// Score weight table.
    pub score: ScoreWeights,
    /// Per-provider overrides keyed by provider name.
    pub providers: BTreeMap<String, ProviderSettings>,
}

impl EngineConfig {
    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let size = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?.len();
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Validates range and consistency constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request.timeout_ms == 0 {
            return Err(ConfigError::Invalid("request.timeout_ms must be at least 1".to_string()));
        }
        if self.request.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "request.max_concurrency must be at least 1".to_string(),
            ));
        }
        let weights = [
            ("score.low", self.score.low),
            ("score.medium", self.score.medium),
            ("score.high", self.score.high),
            ("score.critical", self.score.critical),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || !(0.0..=100.0).contains(&weight) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite value within [0, 100]"
                )));
            }
        }
        if !(self.score.low <= self.score.medium
            && self.score.medium <= self.score.high
            && self.score.high <= self.score.critical)
        {
            return Err(ConfigError::Invalid(
                "score weights must be monotone (low <= medium <= high <= critical)".to_string(),
            ));
        }
        if !self.score.warning_factor.is_finite()
            || !(0.0..=1.0).contains(&self.score.warning_factor)
        {
            return Err(ConfigError::Invalid(
                "score.warning_factor must be within [0, 1]".to_string(),
            ));
        }
        for (name, settings) in &self.providers {
            if settings.timeout_ms == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "providers.{name}.timeout_ms must be at least 1"
                )));
            }
        }
        Ok(())
    }

    /// Returns the configured orchestrator limits.
    #[must_use]
    pub fn limits(&self) -> OrchestratorLimits {
        self.request.into()
    }

    /// Returns the configured score policy.
    #[must_use]
    pub fn policy(&self) -> ScorePolicy {
        self.score.into()
    }

    /// Returns the override settings for a provider, if configured.
    #[must_use]
    pub fn provider_settings(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers.get(name)
    }
}
