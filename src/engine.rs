//! # Scoring Engine
//! Pure, testable pipeline that maps `RawSignalBundle` → `ScoreReport`.
//! No I/O and no interior mutability: one engine can be shared by reference
//! (or cloned) across any number of threads.
//!
//! Configuration problems are caught once in `ScoringEngine::new`; after that
//! `compute` cannot fail.

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use tracing::debug;

use crate::aggregate::{aggregate, explain};
use crate::config::ScoringConfig;
use crate::normalize::normalize;
use crate::report::ScoreReport;
use crate::signals::RawSignalBundle;
use crate::weights::WeightTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringEngine {
    weights: WeightTable,
    coverage_penalty: f64,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        let cfg = ScoringConfig::default();
        Self {
            weights: cfg.weights,
            coverage_penalty: cfg.coverage_penalty,
        }
    }
}

impl ScoringEngine {
    /// Validate the config and build an engine from it.
    pub fn new(cfg: ScoringConfig) -> Result<Self> {
        cfg.validate().context("scoring engine config")?;
        Ok(Self {
            weights: cfg.weights,
            coverage_penalty: cfg.coverage_penalty,
        })
    }

    /// Engine from `$SCORECARD_CONFIG_PATH` / `config/scoring.*` / defaults.
    pub fn from_env() -> Result<Self> {
        Self::new(crate::config::load_config_default()?)
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn coverage_penalty(&self) -> f64 {
        self.coverage_penalty
    }

    /// Normalize, aggregate and explain one bundle.
    pub fn compute(&self, bundle: &RawSignalBundle) -> ScoreReport {
        let scores = normalize(bundle);
        let agg = aggregate(&scores, &self.weights, self.coverage_penalty);
        let explanation = explain(&scores, &agg);

        counter!("scorecard_reports_total").increment(1);
        histogram!("scorecard_coverage_ratio").record(agg.coverage);
        if agg.composite.is_none() {
            counter!("scorecard_reports_without_composite_total").increment(1);
        }
        debug!(
            target: "scorecard",
            coverage = agg.coverage,
            composite = ?agg.composite,
            missing = agg.missing.values().filter(|m| **m).count(),
            "score report computed"
        );

        ScoreReport::new(scores, agg, explanation)
    }
}
