// src/config.rs
//! Scoring configuration: composite weights and coverage penalty strength.
//!
//! TOML:
//! ```toml
//! coverage_penalty = 0.15
//!
//! [weights]
//! innovation = 0.18
//! # ... all seven keys
//! ```
//! JSON uses the same shape. Both fields are optional and fall back to defaults.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::weights::WeightTable;

pub const ENV_CONFIG_PATH: &str = "SCORECARD_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/scoring.toml";
pub const DEFAULT_JSON_PATH: &str = "config/scoring.json";

/// Default strength of the coverage penalty: `composite * (0.85 + 0.15 * coverage)`.
pub const DEFAULT_COVERAGE_PENALTY: f64 = 0.15;

fn default_coverage_penalty() -> f64 {
    DEFAULT_COVERAGE_PENALTY
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: WeightTable,
    /// 0 disables the penalty, 1 scales the composite linearly with coverage.
    #[serde(default = "default_coverage_penalty")]
    pub coverage_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            coverage_penalty: DEFAULT_COVERAGE_PENALTY,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        let p = self.coverage_penalty;
        if !(0.0..=1.0).contains(&p) {
            bail!("coverage_penalty must be within [0, 1], got {p}");
        }
        Ok(())
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<ScoringConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading scoring config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing scoring config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid scoring config {}", path.display()))?;
    info!(target: "scorecard", path = %path.display(), "scoring config loaded");
    Ok(cfg)
}

/// Load config using env var + fallbacks:
/// 1) $SCORECARD_CONFIG_PATH
/// 2) config/scoring.toml
/// 3) config/scoring.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<ScoringConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!(
                "{ENV_CONFIG_PATH} points to non-existent path {}",
                pb.display()
            ));
        }
    }
    for p in [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH] {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
    }
    warn!(target: "scorecard", "no scoring config found, using built-in defaults");
    Ok(ScoringConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ScoringConfig> {
    match hint_ext {
        "toml" => return Ok(toml::from_str(s)?),
        "json" => return Ok(serde_json::from_str(s)?),
        _ => {}
    }
    // No usable extension: JSON objects start with '{', everything else is TOML.
    if s.trim_start().starts_with('{') {
        Ok(serde_json::from_str(s)?)
    } else {
        Ok(toml::from_str(s)?)
    }
}
