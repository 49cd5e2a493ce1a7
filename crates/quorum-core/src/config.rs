//! Analysis configuration (`.quorum/config.toml`).
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! the reference parameters: damping 0.85, tolerance 1e-6, 100 iterations,
//! leader threshold 0.08, anomaly threshold 2.0, seed 42, sample size 5000.
//!
//! Parsing works on strings only; locating and reading the file is left to
//! the caller.

use serde::{Deserialize, Serialize};

/// Project-relative location of the optional config file.
pub const CONFIG_PATH: &str = ".quorum/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub authority: AuthorityConfig,
    #[serde(default)]
    pub benford: BenfordConfig,
    #[serde(default)]
    pub simulation: SampleConfig,
}

/// Parameters for the reversed-edge authority ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Nodes scoring strictly above this are reported as leaders.
    #[serde(default = "default_leader_threshold")]
    pub leader_threshold: f64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            leader_threshold: default_leader_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenfordConfig {
    /// Deviation (in percentage points) above which a sample is flagged.
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
}

impl Default for BenfordConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: default_anomaly_threshold(),
        }
    }
}

/// Seed and size for synthetic sample generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_sample_size")]
    pub size: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            size: default_sample_size(),
        }
    }
}

/// Errors from parsing a config document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AnalysisConfig {
    /// Parse a TOML document, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(content)?;
        tracing::debug!(?config, "parsed analysis config");
        Ok(config)
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iterations() -> usize {
    100
}

const fn default_leader_threshold() -> f64 {
    0.08
}

const fn default_anomaly_threshold() -> f64 {
    2.0
}

const fn default_seed() -> u64 {
    42
}

const fn default_sample_size() -> usize {
    5000
}
